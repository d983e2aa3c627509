//! Reporte offline de contratos por VIN
//!
//! Uso: rental_report <rentals.json> [fecha_referencia]
//!
//! Acepta un array de contratos o un envelope `{data: [...]}` tal como lo
//! devuelve `/rentals`, y guarda el reporte completo en
//! `rental_report.json`.

use std::{env, fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono::Utc;

use fleet_console::dto::envelope::unwrap_payload;
use fleet_console::models::dates::{parse_flexible, DayBound};
use fleet_console::models::rental::Rental;
use fleet_console::services::rental_status::RentalCategory;
use fleet_console::services::vin_aggregator::aggregate_by_vin;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Uso: {} <rentals.json> [fecha_referencia]", args[0]);
        std::process::exit(1);
    }

    let json_path = Path::new(&args[1]);
    let now = match args.get(2) {
        Some(at) => match parse_flexible(at, DayBound::Start) {
            Some(now) => now,
            None => bail!("Fecha de referencia inválida: {}", at),
        },
        None => Utc::now(),
    };

    println!("📂 Leyendo contratos desde: {:?}", json_path);
    println!("🕒 Fecha de referencia: {}", now.to_rfc3339());

    let content = fs::read_to_string(json_path).with_context(|| format!("no se pudo leer {:?}", json_path))?;
    let body: serde_json::Value = serde_json::from_str(&content)?;
    let rentals: Vec<Rental> = serde_json::from_value(unwrap_payload(200, body)?)?;

    let report = aggregate_by_vin(&rentals, now);

    println!("\n📊 Resumen:");
    println!("  Contratos: {}", rentals.len());
    println!("  Vehículos: {}", report.vehicles.len());
    println!("  Sin VIN: {}", report.unassigned);

    let mut by_category = std::collections::BTreeMap::<RentalCategory, usize>::new();
    for summary in report.vehicles.values() {
        if let Some(category) = summary.current_category() {
            *by_category.entry(category).or_insert(0) += 1;
        }
    }
    println!("\n🚗 Estado actual por vehículo:");
    for (category, count) in &by_category {
        println!("  {}: {}", category.as_str(), count);
    }

    if !report.conflicting_vins.is_empty() {
        println!("\n⚠️ Vehículos con contratos activos simultáneos:");
        for vin in &report.conflicting_vins {
            if let Some(summary) = report.get(vin) {
                let ids: Vec<&str> = summary.conflicts.iter().map(|c| c.rental.rental_id.as_str()).collect();
                println!("  {} → en conflicto: {}", vin, ids.join(", "));
            }
        }
    }

    let report_json = serde_json::to_string_pretty(&report)?;
    fs::write("rental_report.json", report_json)?;
    println!("\n💾 Reporte completo guardado en: rental_report.json");

    Ok(())
}
