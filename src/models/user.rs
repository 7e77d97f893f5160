//! Modelo de User y control de acceso
//! 
//! El núcleo solo expone autenticación y el rol resuelto; la sesión y el
//! gating de navegación son asunto de la capa de presentación. Las
//! operaciones protegidas reciben la identidad actuante como argumento
//! explícito, nunca desde estado de sesión compartido.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Rol de autorización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// El almacén guarda el rol como texto abierto; cualquier valor
    /// distinto de "admin" se trata como rol básico.
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Identidad actuante: quién ejecuta un comando y con qué rol
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Fila completa de `users`; el hash nunca sale de la capa de acceso
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Usuario para listados: nunca expone el hash
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserInfo {
    pub username: String,
    pub role: String,
}

/// Request para crear un usuario
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    pub role: UserRole,
}
