//! Ordenación y filtrado genérico de tablas
//!
//! Cualquier fila que implemente `TableRow` se puede ordenar por columnas
//! (con inferencia de tipo por columna) y filtrar con filtros tipados.
//! `serde_json::Value` implementa `TableRow` con rutas tipo
//! `rentalPeriod.start`, así que cualquier modelo serializable sirve.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::dates::{parse_flexible, DayBound};

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 500;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Valor crudo de una celda
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        self.as_date_bound(DayBound::Start)
    }

    fn as_date_bound(&self, bound: DayBound) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Text(s) => parse_flexible(s, bound),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Number(n) if *n == 1.0 => Some(true),
            CellValue::Number(n) if *n == 0.0 => Some(false),
            CellValue::Text(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Representación textual usada por los filtros de texto y select
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Date(d) => d.to_rfc3339(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "si" | "sí" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Fila de una tabla
pub trait TableRow {
    fn cell(&self, column: &str) -> CellValue;
}

impl TableRow for serde_json::Value {
    fn cell(&self, column: &str) -> CellValue {
        let mut current = self;
        for segment in column.split('.') {
            let next = match current {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return CellValue::Null,
            }
        }

        match current {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            serde_json::Value::Array(items) => CellValue::Text(
                items
                    .iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Serializar modelos a filas JSON
pub fn to_rows<T: Serialize>(items: &[T]) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    items.iter().map(serde_json::to_value).collect()
}

// ---------------------------------------------------------------------------
// Ordenación
// ---------------------------------------------------------------------------

/// Tipo inferido de una columna
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Date,
    Boolean,
    Text,
}

/// Inferir el tipo de una columna a partir de sus celdas no nulas
pub fn infer_column_type<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> ColumnType {
    let cells: Vec<&CellValue> = cells.into_iter().filter(|c| !c.is_null()).collect();
    if cells.is_empty() {
        return ColumnType::Text;
    }
    if cells.iter().all(|c| c.as_number().is_some()) {
        return ColumnType::Number;
    }
    if cells.iter().all(|c| c.as_date().is_some()) {
        return ColumnType::Date;
    }
    if cells.iter().all(|c| c.as_bool().is_some()) {
        return ColumnType::Boolean;
    }
    ColumnType::Text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Date(DateTime<Utc>),
    Bool(bool),
    Text(String),
}

fn sort_key(cell: &CellValue, column_type: ColumnType) -> Option<SortKey> {
    if cell.is_null() {
        return None;
    }
    match column_type {
        ColumnType::Number => cell.as_number().map(SortKey::Number),
        ColumnType::Date => cell.as_date().map(SortKey::Date),
        ColumnType::Boolean => cell.as_bool().map(SortKey::Bool),
        ColumnType::Text => Some(SortKey::Text(cell.display().to_lowercase())),
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Date(x), SortKey::Date(y)) => x.cmp(y),
        (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Nulos siempre al final, en ambas direcciones
fn compare_optional(a: &Option<SortKey>, b: &Option<SortKey>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ordering = compare_keys(x, y);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Orden de las filas como índices sobre `rows`. Estable: con claves
/// iguales se conserva el orden original.
pub fn sort_indices<R: TableRow>(rows: &[R], sorts: &[SortSpec]) -> Vec<usize> {
    let columns: Vec<(SortDirection, Vec<Option<SortKey>>)> = sorts
        .iter()
        .map(|spec| {
            let cells: Vec<CellValue> = rows.iter().map(|r| r.cell(&spec.column)).collect();
            let column_type = infer_column_type(&cells);
            let keys = cells.iter().map(|c| sort_key(c, column_type)).collect();
            (spec.direction, keys)
        })
        .collect();

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        columns
            .iter()
            .map(|(direction, keys)| compare_optional(&keys[a], &keys[b], *direction))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    order
}

/// Ordenar filas (ver `sort_indices`)
pub fn sort_rows<R: TableRow>(rows: Vec<R>, sorts: &[SortSpec]) -> Vec<R> {
    if sorts.is_empty() {
        return rows;
    }
    let order = sort_indices(&rows, sorts);
    reorder(rows, &order)
}

fn reorder<R>(rows: Vec<R>, order: &[usize]) -> Vec<R> {
    let mut slots: Vec<Option<R>> = rows.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots.get_mut(i).and_then(Option::take)).collect()
}

// ---------------------------------------------------------------------------
// Filtros
// ---------------------------------------------------------------------------

/// Predicado arbitrario para filtros `custom`
#[derive(Clone)]
pub struct CustomFilter(Arc<dyn Fn(&CellValue) -> bool + Send + Sync>);

impl CustomFilter {
    pub fn new(predicate: impl Fn(&CellValue) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }
}

impl fmt::Debug for CustomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomFilter(..)")
    }
}

/// Filtro de una columna
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnFilter {
    Text {
        #[serde(default)]
        query: String,
    },
    Select {
        #[serde(default)]
        value: Option<String>,
    },
    MultiSelect {
        #[serde(default)]
        values: Vec<String>,
    },
    NumberRange {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    DateRange {
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
    },
    Boolean {
        #[serde(default)]
        value: Option<bool>,
    },
    #[serde(skip)]
    Custom(CustomFilter),
}

impl ColumnFilter {
    pub fn text(query: impl Into<String>) -> Self {
        ColumnFilter::Text { query: query.into() }
    }

    pub fn custom(predicate: impl Fn(&CellValue) -> bool + Send + Sync + 'static) -> Self {
        ColumnFilter::Custom(CustomFilter::new(predicate))
    }

    /// Un filtro vacío deja pasar todas las filas
    pub fn is_active(&self) -> bool {
        match self {
            ColumnFilter::Text { query } => !query.trim().is_empty(),
            ColumnFilter::Select { value } => value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false),
            ColumnFilter::MultiSelect { values } => !values.is_empty(),
            ColumnFilter::NumberRange { min, max } => min.is_some() || max.is_some(),
            ColumnFilter::DateRange { from, to } => {
                from.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
                    || to.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
            }
            ColumnFilter::Boolean { value } => value.is_some(),
            ColumnFilter::Custom(_) => true,
        }
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        if !self.is_active() {
            return true;
        }
        if let ColumnFilter::Custom(CustomFilter(predicate)) = self {
            return (**predicate)(cell);
        }
        if cell.is_null() {
            return false;
        }

        match self {
            ColumnFilter::Text { query } => cell
                .display()
                .to_lowercase()
                .contains(&query.trim().to_lowercase()),
            ColumnFilter::Select { value } => value
                .as_deref()
                .map(|v| cell.display().eq_ignore_ascii_case(v.trim()))
                .unwrap_or(true),
            ColumnFilter::MultiSelect { values } => {
                let display = cell.display();
                values.iter().any(|v| display.eq_ignore_ascii_case(v.trim()))
            }
            ColumnFilter::NumberRange { min, max } => match cell.as_number() {
                Some(n) => min.map(|m| n >= m).unwrap_or(true) && max.map(|m| n <= m).unwrap_or(true),
                None => false,
            },
            ColumnFilter::DateRange { from, to } => {
                let Some(date) = cell.as_date() else {
                    return false;
                };
                let lower = from.as_deref().and_then(|s| parse_flexible(s, DayBound::Start));
                let upper = to.as_deref().and_then(|s| parse_flexible(s, DayBound::End));
                lower.map(|l| date >= l).unwrap_or(true) && upper.map(|u| date <= u).unwrap_or(true)
            }
            ColumnFilter::Boolean { value } => match (cell.as_bool(), value) {
                (Some(b), Some(v)) => b == *v,
                _ => false,
            },
            ColumnFilter::Custom(_) => true,
        }
    }
}

pub type ColumnFilters = BTreeMap<String, ColumnFilter>;

/// Índices de las filas que pasan todos los filtros
pub fn filter_indices<R: TableRow>(rows: &[R], filters: &ColumnFilters) -> Vec<usize> {
    let active: Vec<(&String, &ColumnFilter)> = filters.iter().filter(|(_, f)| f.is_active()).collect();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| active.iter().all(|(column, filter)| filter.matches(&row.cell(column))))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn filter_rows<R: TableRow>(rows: Vec<R>, filters: &ColumnFilters) -> Vec<R> {
    let keep = filter_indices(&rows, filters);
    reorder(rows, &keep)
}

/// Búsqueda global: subcadena sin distinguir mayúsculas en cualquiera de las columnas
pub fn search_rows<R: TableRow>(rows: Vec<R>, query: &str, columns: &[String]) -> Vec<R> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || columns.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            columns
                .iter()
                .any(|c| row.cell(c).display().to_lowercase().contains(&needle))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Consulta completa
// ---------------------------------------------------------------------------

/// Consulta de tabla: filtros, búsqueda, orden y página
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    #[serde(default)]
    pub sort: Vec<SortSpec>,
    #[serde(default)]
    pub filters: ColumnFilters,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub search_columns: Vec<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<R> {
    pub rows: Vec<R>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Página 1-based; tamaño acotado a `1..=MAX_PAGE_SIZE`
pub fn paginate<R>(rows: Vec<R>, page: Option<usize>, page_size: Option<usize>) -> TablePage<R> {
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(page_size);
    let rows = rows
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    TablePage {
        rows,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// filtros → búsqueda → orden → página
pub fn run_query<R: TableRow>(rows: Vec<R>, query: &TableQuery) -> TablePage<R> {
    let rows = filter_rows(rows, &query.filters);
    let rows = match query.search.as_deref() {
        Some(q) => search_rows(rows, q, &query.search_columns),
        None => rows,
    };
    let rows = sort_rows(rows, &query.sort);
    paginate(rows, query.page, query.page_size)
}

// ---------------------------------------------------------------------------
// Debounce de filtros
// ---------------------------------------------------------------------------

/// Retiene los cambios de filtro hasta que la columna lleva `delay` sin
/// cambios. Cada columna tiene su propio temporizador.
#[derive(Debug, Clone)]
pub struct FilterDebouncer {
    delay: Duration,
    committed: ColumnFilters,
    pending: BTreeMap<String, (Option<ColumnFilter>, Instant)>,
}

impl Default for FilterDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl FilterDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            committed: ColumnFilters::new(),
            pending: BTreeMap::new(),
        }
    }

    /// Registrar un cambio; reinicia el temporizador de la columna
    pub fn set(&mut self, column: impl Into<String>, filter: ColumnFilter, now: Instant) {
        self.pending.insert(column.into(), (Some(filter), now));
    }

    /// Registrar el borrado del filtro de una columna
    pub fn clear(&mut self, column: impl Into<String>, now: Instant) {
        self.pending.insert(column.into(), (None, now));
    }

    /// Aplicar los cambios que ya cumplieron el retardo. Devuelve `true`
    /// si cambió algún filtro aplicado.
    pub fn flush(&mut self, now: Instant) -> bool {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, (_, at))| now.saturating_duration_since(*at) >= self.delay)
            .map(|(column, _)| column.clone())
            .collect();

        for column in &due {
            if let Some((filter, _)) = self.pending.remove(column) {
                self.apply(column.clone(), filter);
            }
        }
        !due.is_empty()
    }

    /// Aplicar todo lo pendiente sin esperar
    pub fn flush_all(&mut self) -> bool {
        let pending = std::mem::take(&mut self.pending);
        let changed = !pending.is_empty();
        for (column, (filter, _)) in pending {
            self.apply(column, filter);
        }
        changed
    }

    fn apply(&mut self, column: String, filter: Option<ColumnFilter>) {
        match filter {
            Some(filter) => {
                self.committed.insert(column, filter);
            }
            None => {
                self.committed.remove(&column);
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Filtros aplicados actualmente
    pub fn committed(&self) -> &ColumnFilters {
        &self.committed
    }
}
