//! Tests del ciclo de vida contra PostgreSQL
//!
//! Requieren DATABASE_URL apuntando a una base con schema.sql cargado;
//! por eso van con #[ignore]:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use transport_backend::controllers::delivery_controller::DeliveryController;
use transport_backend::controllers::refueling_controller::RefuelingController;
use transport_backend::database::create_pool;
use transport_backend::dto::delivery_dto::PaymentRequest;
use transport_backend::dto::driver_dto::RefuelingRequest;
use transport_backend::models::client::Client;
use transport_backend::models::delivery::{Delivery, DeliveryStatus, DeliveryType};
use transport_backend::models::driver::{Driver, DriverStatus};
use transport_backend::models::fleet::{Fleet, FleetStatus};
use transport_backend::models::payment::PaymentMethod;
use transport_backend::repositories::delivery_repository::{
    DeliveryRepository, NewCargo, NewRoute,
};
use transport_backend::repositories::driver_repository::DriverRepository;
use transport_backend::repositories::user_repository::{NewAccount, NewProfile, UserRepository};
use transport_backend::utils::errors::AppError;

async fn test_pool() -> PgPool {
    create_pool(None).await.expect("DATABASE_URL con schema cargado")
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn make_client(pool: &PgPool) -> Client {
    let (_, client) = UserRepository::new(pool.clone())
        .create_client_account(
            NewAccount {
                username: unique("cliente"),
                email: None,
                password_hash: "hash-de-pruebas".to_string(),
            },
            NewProfile {
                last_name: "García".to_string(),
                first_name: "Lucía".to_string(),
                patronymic: None,
                phone: "+34600000000".to_string(),
            },
        )
        .await
        .unwrap();
    client
}

async fn make_fleet(pool: &PgPool) -> Fleet {
    // Matrícula corta y única (la columna es VARCHAR(20))
    let plate = format!("M-{}", &Uuid::new_v4().simple().to_string()[..8]);
    sqlx::query_as::<_, Fleet>(
        "INSERT INTO fleet (id, license_plate, model, capacity, status) \
         VALUES ($1, $2, 'Ford Transit', 1500.00, 'parked') RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(plate)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn make_driver(pool: &PgPool, fleet_id: Option<Uuid>) -> Driver {
    let (_, driver) = UserRepository::new(pool.clone())
        .create_driver_account(
            NewAccount {
                username: unique("conductor"),
                email: None,
                password_hash: "hash-de-pruebas".to_string(),
            },
            NewProfile {
                last_name: "Pérez".to_string(),
                first_name: "Andrés".to_string(),
                patronymic: None,
                phone: "+34611111111".to_string(),
            },
            "B-1234567".to_string(),
            5,
            fleet_id,
        )
        .await
        .unwrap();
    driver
}

/// Entrega de 20 kg a 10 km: precio esperado 700.00
async fn make_delivery(pool: &PgPool, client: &Client) -> Delivery {
    let (delivery, _, _) = DeliveryRepository::new(pool.clone())
        .create(
            client.id,
            DeliveryType::Local,
            NewCargo {
                name: "Muebles".to_string(),
                weight: dec("20"),
            },
            NewRoute {
                departure_city: "Málaga".to_string(),
                departure_street: "Calle Larios".to_string(),
                departure_house: "12".to_string(),
                arrival_city: "Córdoba".to_string(),
                arrival_street: "Av. América".to_string(),
                arrival_house: "3".to_string(),
                distance: Some(dec("10")),
            },
        )
        .await
        .unwrap();
    delivery
}

async fn fleet_status(pool: &PgPool, id: Uuid) -> FleetStatus {
    sqlx::query_as::<_, Fleet>("SELECT * FROM fleet WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
        .status
}

async fn driver_status(pool: &PgPool, id: Uuid) -> DriverStatus {
    DriverRepository::new(pool.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL con schema.sql cargado"]
async fn concurrent_accept_has_exactly_one_winner() {
    let pool = test_pool().await;
    let client = make_client(&pool).await;
    let delivery = make_delivery(&pool, &client).await;
    let driver_a = make_driver(&pool, None).await;
    let driver_b = make_driver(&pool, None).await;

    let repo_a = DeliveryRepository::new(pool.clone());
    let repo_b = DeliveryRepository::new(pool.clone());

    let (res_a, res_b) = tokio::join!(
        repo_a.accept(delivery.id, &driver_a),
        repo_b.accept(delivery.id, &driver_b),
    );

    let winners = [res_a.is_ok(), res_b.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(winners, 1, "exactamente un conductor debe ganar la carrera");

    let a_ok = res_a.is_ok();
    let loser = if a_ok { res_b } else { res_a };
    assert!(matches!(loser, Err(AppError::Conflict(_))));

    let final_state = repo_a.find_by_id(delivery.id).await.unwrap().unwrap();
    assert_eq!(final_state.status, DeliveryStatus::EnRoute);
    let winner_id = if a_ok { driver_a.id } else { driver_b.id };
    assert_eq!(final_state.driver_id, Some(winner_id));

    // El perdedor sigue libre
    let loser_id = if a_ok { driver_b.id } else { driver_a.id };
    assert_eq!(driver_status(&pool, loser_id).await, DriverStatus::Free);
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL con schema.sql cargado"]
async fn vehicle_follows_driver_through_cancel_and_reaccept() {
    let pool = test_pool().await;
    let client = make_client(&pool).await;
    let delivery = make_delivery(&pool, &client).await;
    let fleet_a = make_fleet(&pool).await;
    let fleet_b = make_fleet(&pool).await;
    let driver_a = make_driver(&pool, Some(fleet_a.id)).await;
    let driver_b = make_driver(&pool, Some(fleet_b.id)).await;

    let repo = DeliveryRepository::new(pool.clone());

    // in_use al aceptar
    repo.accept(delivery.id, &driver_a).await.unwrap();
    assert_eq!(fleet_status(&pool, fleet_a.id).await, FleetStatus::InUse);
    assert_eq!(driver_status(&pool, driver_a.id).await, DriverStatus::EnRoute);

    // parked al devolverla, nunca se salta ese estado
    repo.driver_cancel(delivery.id, &driver_a).await.unwrap();
    assert_eq!(fleet_status(&pool, fleet_a.id).await, FleetStatus::Parked);
    assert_eq!(driver_status(&pool, driver_a.id).await, DriverStatus::Free);

    let reopened = repo.find_by_id(delivery.id).await.unwrap().unwrap();
    assert_eq!(reopened.status, DeliveryStatus::Placed);
    assert_eq!(reopened.driver_id, None);

    // otro conductor la toma: su vehículo pasa a in_use, el primero sigue parked
    repo.accept(delivery.id, &driver_b).await.unwrap();
    assert_eq!(fleet_status(&pool, fleet_b.id).await, FleetStatus::InUse);
    assert_eq!(fleet_status(&pool, fleet_a.id).await, FleetStatus::Parked);

    // completar devuelve todo a reposo
    repo.complete(delivery.id, &driver_b).await.unwrap();
    assert_eq!(fleet_status(&pool, fleet_b.id).await, FleetStatus::Parked);
    assert_eq!(driver_status(&pool, driver_b.id).await, DriverStatus::Free);

    let done = repo.find_by_id(delivery.id).await.unwrap().unwrap();
    assert_eq!(done.status, DeliveryStatus::Delivered);
    assert_eq!(done.driver_id, Some(driver_b.id));
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL con schema.sql cargado"]
async fn client_cannot_cancel_after_driver_commitment() {
    let pool = test_pool().await;
    let client = make_client(&pool).await;
    let delivery = make_delivery(&pool, &client).await;
    let driver = make_driver(&pool, None).await;

    let repo = DeliveryRepository::new(pool.clone());
    repo.accept(delivery.id, &driver).await.unwrap();

    let result = repo.cancel_by_client(client.id, delivery.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let state = repo.find_by_id(delivery.id).await.unwrap().unwrap();
    assert_eq!(state.status, DeliveryStatus::EnRoute);
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL con schema.sql cargado"]
async fn duplicate_payment_is_an_idempotent_noop() {
    let pool = test_pool().await;
    let client = make_client(&pool).await;
    let delivery = make_delivery(&pool, &client).await;
    let driver = make_driver(&pool, None).await;

    let repo = DeliveryRepository::new(pool.clone());
    repo.accept(delivery.id, &driver).await.unwrap();
    repo.complete(delivery.id, &driver).await.unwrap();

    let controller = DeliveryController::new(pool.clone());

    // 20 kg a 10 km: el snapshot del pago debe ser 700.00
    let first = controller
        .record_payment(&client, delivery.id, PaymentRequest { method: PaymentMethod::Card })
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(first.data.as_ref().unwrap().amount, dec("700.00"));

    let second = controller
        .record_payment(&client, delivery.id, PaymentRequest { method: PaymentMethod::Cash })
        .await
        .unwrap();
    assert!(second.success);
    assert!(second.data.is_none(), "el duplicado no crea otro pago");

    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM payments WHERE delivery_id = $1")
            .bind(delivery.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL con schema.sql cargado"]
async fn payment_requires_a_delivered_delivery() {
    let pool = test_pool().await;
    let client = make_client(&pool).await;
    let delivery = make_delivery(&pool, &client).await;

    let controller = DeliveryController::new(pool.clone());
    let result = controller
        .record_payment(&client, delivery.id, PaymentRequest { method: PaymentMethod::Card })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requiere DATABASE_URL con schema.sql cargado"]
async fn refueling_total_is_derived_server_side() {
    let pool = test_pool().await;
    let fleet = make_fleet(&pool).await;
    let with_vehicle = make_driver(&pool, Some(fleet.id)).await;
    let without_vehicle = make_driver(&pool, None).await;

    let controller = RefuelingController::new(pool.clone());

    let response = controller
        .record(
            &with_vehicle,
            RefuelingRequest {
                fuel_type: "diesel".to_string(),
                liters: dec("45.5"),
                cost_per_liter: dec("55.00"),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.data.unwrap().total_cost, dec("2502.25"));

    let denied = controller
        .record(
            &without_vehicle,
            RefuelingRequest {
                fuel_type: "diesel".to_string(),
                liters: dec("45.5"),
                cost_per_liter: dec("55.00"),
            },
        )
        .await;
    assert!(matches!(denied, Err(AppError::NoVehicleAssigned)));
}
