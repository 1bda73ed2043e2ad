//! Repositorio de cuentas de usuario
//!
//! El registro crea la cuenta y su perfil (cliente o conductor) como una
//! unidad: si el perfil no puede crearse, la cuenta tampoco queda.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::Client;
use crate::models::driver::Driver;
use crate::models::fleet::Fleet;
use crate::models::user::{User, UserRole};
use crate::utils::errors::{is_unique_violation, store_error, AppError};

/// Datos de la cuenta nueva
pub struct NewAccount {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// Datos comunes del perfil
pub struct NewProfile {
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub phone: String,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando usuario", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error buscando usuario", e))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| store_error("Error comprobando nombre de usuario", e))?;

        Ok(result.0)
    }

    /// Registrar una cuenta de cliente con su perfil
    pub async fn create_client_account(
        &self,
        account: NewAccount,
        profile: NewProfile,
    ) -> Result<(User, Client), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Error abriendo transacción", e))?;

        let user = insert_user(&mut tx, account, UserRole::Client).await?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, user_id, last_name, first_name, patronymic, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(profile.last_name)
        .bind(profile.first_name)
        .bind(profile.patronymic)
        .bind(profile.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("Error creando perfil de cliente", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Error confirmando registro", e))?;

        Ok((user, client))
    }

    /// Registrar una cuenta de conductor con su perfil.
    ///
    /// Si el conductor eligió un vehículo de la flota, se verifica dentro
    /// de la transacción que siga estacionado; el selector del formulario
    /// pudo quedarse obsoleto.
    pub async fn create_driver_account(
        &self,
        account: NewAccount,
        profile: NewProfile,
        driving_license: String,
        experience_years: i32,
        fleet_id: Option<Uuid>,
    ) -> Result<(User, Driver), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Error abriendo transacción", e))?;

        if let Some(fleet_id) = fleet_id {
            let available = sqlx::query_as::<_, Fleet>(
                "SELECT * FROM fleet WHERE id = $1 AND status = 'parked' FOR UPDATE",
            )
            .bind(fleet_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| store_error("Error verificando vehículo", e))?;

            if available.is_none() {
                tx.rollback().await.ok();
                return Err(AppError::Conflict(
                    "El vehículo seleccionado ya no está disponible".to_string(),
                ));
            }
        }

        let user = insert_user(&mut tx, account, UserRole::Driver).await?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, user_id, last_name, first_name, patronymic, phone,
                                 driving_license, experience_years, status, fleet_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'free', $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(profile.last_name)
        .bind(profile.first_name)
        .bind(profile.patronymic)
        .bind(profile.phone)
        .bind(driving_license)
        .bind(experience_years)
        .bind(fleet_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("Error creando perfil de conductor", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Error confirmando registro", e))?;

        Ok((user, driver))
    }
}

async fn insert_user(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    account: NewAccount,
    role: UserRole,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash, role, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(account.username)
    .bind(account.email)
    .bind(account.password_hash)
    .bind(role)
    .bind(chrono::Utc::now())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("El nombre de usuario ya está registrado".to_string())
        } else {
            store_error("Error creando usuario", e)
        }
    })
}
