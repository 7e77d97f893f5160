//! Servicio de autenticación y control de acceso
//!
//! Autentica credenciales contra el hash almacenado y resuelve el rol de
//! autorización. No hay modelo de sesión ni token: el núcleo solo expone
//! los predicados; la vida de la sesión es asunto de la presentación.
//!
//! El hash es SHA-256 sin sal y de una sola ronda, mantenido como
//! placeholder por compatibilidad con almacenes existentes: es vulnerable
//! a tablas precalculadas y no debe proteger credenciales reales. Un
//! despliegue de producción debe migrar a un hash lento con sal (bcrypt o
//! argon2) y rotar de forma forzada la credencial sembrada `admin`.

use sha2::{Digest, Sha256};
use sqlx::Connection;
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::models::{Identity, NewUser, UserInfo, UserRole};
use crate::repositories::{change_log_repository, user_repository};
use crate::utils::errors::{forbidden_error, AppResult};

/// Hash heredado: SHA-256 hex del password en claro
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub struct AuthService {
    store: Store,
}

impl AuthService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Autenticar un usuario
    ///
    /// Devuelve el rol de la fila si el hash coincide; `None` si el usuario
    /// no existe o la credencial es incorrecta. Sin contador de bloqueo.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<UserRole>> {
        let mut conn = self.store.conn().await?;

        let user = match user_repository::find_by_username(&mut conn, username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if user.password != hash_password(password) {
            return Ok(None);
        }

        Ok(Some(UserRole::parse(&user.role)))
    }

    /// Crear un usuario (solo administradores)
    ///
    /// Falla con `Conflict` si el nombre ya está tomado; la creación y su
    /// entrada de auditoría se confirman juntas.
    pub async fn create_user(&self, actor: &Identity, new_user: NewUser) -> AppResult<()> {
        if !actor.role.is_admin() {
            return Err(forbidden_error("create user", "administrator role required"));
        }

        new_user.validate()?;

        let mut conn = self.store.conn().await?;
        let mut tx = conn.begin().await?;

        user_repository::insert(
            &mut tx,
            &new_user.username,
            &hash_password(&new_user.password),
            new_user.role.as_str(),
        )
        .await?;

        change_log_repository::append(
            &mut tx,
            &actor.username,
            "INSERT",
            "users",
            &new_user.username,
        )
        .await?;

        tx.commit().await?;

        info!(username = %new_user.username, role = new_user.role.as_str(), "user created");
        Ok(())
    }

    /// Listar usuarios sin hashes (solo administradores)
    pub async fn list_users(&self, actor: &Identity) -> AppResult<Vec<UserInfo>> {
        if !actor.role.is_admin() {
            return Err(forbidden_error("list users", "administrator role required"));
        }

        let mut conn = self.store.conn().await?;
        user_repository::list(&mut conn).await
    }
}
