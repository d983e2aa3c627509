//! Reenvío de credenciales
//!
//! El gateway no valida tokens: el backend es quien decide. Solo extrae
//! el `Authorization: Bearer` de la request para reenviarlo.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::utils::errors::AppError;

/// Token bearer de la request, si viene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

/// Extraer el token de un valor de cabecera `Authorization`
pub fn parse_bearer(value: &str) -> Result<String, AppError> {
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Cabecera Authorization mal formada".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::Unauthorized("Se esperaba un token Bearer".to_string()));
    }
    Ok(token.trim().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(BearerToken(None));
        };
        let value = value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Cabecera Authorization inválida".to_string()))?;
        parse_bearer(value).map(|token| BearerToken(Some(token)))
    }
}
