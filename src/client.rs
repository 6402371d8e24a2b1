//! Cliente HTTP para el backend de la tienda
//!
//! Este módulo contiene el cliente REST: autenticación, catálogo de coches,
//! favoritos, reservas, comentarios y administración. Las peticiones (salvo
//! el test de conexión) pasan por `execute`, que añade el token, aplica el
//! timeout adecuado y reintenta solo si el backend es inalcanzable.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::{AuthResponse, AuthSession, JwtClaims, LoginRequest, RegisterRequest};
use crate::models::comment::{Comment, CommentRequest};
use crate::models::favorite::{AddFavoriteRequest, AddFavoriteResponse, Favorite, FavoriteList};
use crate::models::images::resolve_image_url;
use crate::models::reservation::{
    CreateReservationRequest, CreateReservationResponse, Reservation, ReservationList,
};
use crate::models::user::{AdminContact, UpdateProfileRequest, UserEnvelope, UserInfo};
use crate::models::vehicle::{decode_vehicle_list, CarEnvelope, CarId, CarPayload, Vehicle};
use crate::services::catalog_service::CarFetcher;
use crate::services::retry::{with_retry, RetryPolicy};
use crate::utils::errors::{AppError, AppResult};

/// Cliente HTTP del backend
#[derive(Clone)]
pub struct StorefrontClient {
    client: Client,
    config: EnvironmentConfig,
    retry: RetryPolicy,
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl StorefrontClient {
    /// Crear nuevo cliente a partir de la configuración
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            retry: RetryPolicy::from_config(&config),
            config,
            session: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// URL mostrable para una referencia de imagen del backend
    pub fn image_url(&self, reference: &str) -> String {
        resolve_image_url(reference, &self.config.media_base_url)
    }

    // ------------------------------------------------------------------
    // Sesión
    // ------------------------------------------------------------------

    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| !session.is_expired())
            .unwrap_or(false)
    }

    /// Restaura una sesión guardada (p. ej. token persistido por la app)
    pub async fn restore_session(&self, token: String, user: UserInfo) -> AppResult<AuthSession> {
        let session = AuthSession {
            expires_at: token_expiry(&token)?,
            token,
            user,
        };
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    pub async fn logout(&self) {
        *self.session.write().await = None;
        info!("👋 Sesión cerrada");
    }

    async fn bearer_token(&self) -> Option<String> {
        let session = self.session.read().await;
        match session.as_ref() {
            Some(session) if session.is_expired() => {
                warn!("⚠️ Token expirado, la petición se envía sin autenticación");
                None
            }
            Some(session) => Some(session.token.clone()),
            None => None,
        }
    }

    // ------------------------------------------------------------------
    // Autenticación
    // ------------------------------------------------------------------

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<AuthSession> {
        request.validate()?;
        let response: AuthResponse = self.post("/auth/register", request).await?;
        self.restore_session(response.access_token, response.user).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        self.authenticate("/auth/login", email, password).await
    }

    pub async fn admin_login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let session = self.authenticate("/auth/admin/login", email, password).await?;
        if !session.is_admin() {
            self.logout().await;
            return Err(AppError::Forbidden("Acesso negado".to_string()));
        }
        Ok(session)
    }

    async fn authenticate(&self, path: &str, email: &str, password: &str) -> AppResult<AuthSession> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response: AuthResponse = self.post(path, &request).await?;
        info!("🔐 Login correcto para {}", response.user.email);
        self.restore_session(response.access_token, response.user).await
    }

    pub async fn current_user(&self) -> AppResult<UserInfo> {
        let envelope: UserEnvelope = self.get("/auth/me").await?;
        Ok(envelope.user)
    }

    pub async fn get_profile(&self) -> AppResult<UserInfo> {
        let envelope: UserEnvelope = self.get("/profile").await?;
        Ok(envelope.user)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> AppResult<UserInfo> {
        request.validate()?;
        let envelope: UserEnvelope = self.put("/profile", request).await?;

        if let Some(session) = self.session.write().await.as_mut() {
            session.user = envelope.user.clone();
        }
        Ok(envelope.user)
    }

    // ------------------------------------------------------------------
    // Coches
    // ------------------------------------------------------------------

    /// Todos los coches, sea cual sea su estado
    pub async fn list_cars(&self) -> AppResult<Vec<Vehicle>> {
        let payload: Value = self.get("/cars").await?;
        let cars = decode_vehicle_list(&payload);
        info!("📦 Coches cargados: {}", cars.len());
        Ok(cars)
    }

    /// Solo los coches disponibles
    pub async fn list_available_cars(&self) -> AppResult<Vec<Vehicle>> {
        let cars = self.list_cars().await?;
        Ok(cars.into_iter().filter(Vehicle::is_available).collect())
    }

    pub async fn cars_by_type(&self, type_id: &str) -> AppResult<Vec<Vehicle>> {
        let path = format!("/cars/type/{}", urlencoding::encode(type_id));
        let payload: Value = self.get(&path).await?;
        Ok(decode_vehicle_list(&payload))
    }

    pub async fn get_car(&self, car_id: CarId) -> AppResult<Vehicle> {
        let envelope: CarEnvelope = self.get(&format!("/cars/{}", car_id)).await?;
        Ok(envelope.car)
    }

    pub async fn create_car(&self, payload: &CarPayload) -> AppResult<Vehicle> {
        payload.validate()?;
        let envelope: CarEnvelope = self.post("/cars", payload).await?;
        info!("🚗 Coche creado: {} (id {})", envelope.car.display_name(), envelope.car.id);
        Ok(envelope.car)
    }

    pub async fn update_car(&self, car_id: CarId, payload: &CarPayload) -> AppResult<Vehicle> {
        payload.validate()?;
        let envelope: CarEnvelope = self.put(&format!("/cars/{}", car_id), payload).await?;
        Ok(envelope.car)
    }

    pub async fn delete_car(&self, car_id: CarId) -> AppResult<()> {
        let _: Value = self.delete(&format!("/cars/{}", car_id)).await?;
        info!("🗑️ Coche {} eliminado", car_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Favoritos y reservas
    // ------------------------------------------------------------------

    pub async fn list_favorites(&self) -> AppResult<Vec<Favorite>> {
        let list: FavoriteList = self.get("/favorites").await?;
        Ok(list.favorites)
    }

    /// Devuelve el id del favorito creado
    pub async fn add_favorite(&self, car_id: CarId) -> AppResult<i64> {
        let response: AddFavoriteResponse = self.post("/favorites", &AddFavoriteRequest { car_id }).await?;
        Ok(response.favorite_id)
    }

    pub async fn remove_favorite(&self, favorite_id: i64) -> AppResult<()> {
        let _: Value = self.delete(&format!("/favorites/{}", favorite_id)).await?;
        Ok(())
    }

    pub async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        let list: ReservationList = self.get("/reservations").await?;
        Ok(list.reservations)
    }

    /// Devuelve el id de la reserva creada
    pub async fn create_reservation(&self, car_id: CarId, message: &str) -> AppResult<i64> {
        let request = CreateReservationRequest {
            car_id,
            message: message.to_string(),
        };
        let response: CreateReservationResponse = self.post("/reservations", &request).await?;
        info!("📝 Reserva {} creada para el coche {}", response.reservation_id, car_id);
        Ok(response.reservation_id)
    }

    pub async fn admin_reservations(&self) -> AppResult<Vec<Reservation>> {
        let list: ReservationList = self.get("/admin/reservations").await?;
        Ok(list.reservations)
    }

    /// Confirma la venta: reserva y coche pasan a `Vendido`
    pub async fn confirm_reservation(&self, reservation_id: i64) -> AppResult<()> {
        let path = format!("/admin/reservations/{}/confirm", reservation_id);
        let _: Value = self.put(&path, &json!({})).await?;
        Ok(())
    }

    /// Cancela la reserva: el coche vuelve a `Disponível`
    pub async fn cancel_reservation(&self, reservation_id: i64) -> AppResult<()> {
        let path = format!("/admin/reservations/{}/cancel", reservation_id);
        let _: Value = self.put(&path, &json!({})).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Comentarios y varios
    // ------------------------------------------------------------------

    pub async fn car_comments(&self, car_id: CarId) -> AppResult<Vec<Comment>> {
        self.get(&format!("/cars/{}/comments", car_id)).await
    }

    pub async fn post_comment(&self, car_id: CarId, request: &CommentRequest) -> AppResult<Comment> {
        request.validate()?;
        self.post(&format!("/cars/{}/comments", car_id), request).await
    }

    pub async fn all_comments(&self) -> AppResult<Vec<Comment>> {
        self.get("/comments").await
    }

    pub async fn admin_contact(&self) -> AppResult<AdminContact> {
        self.get("/admin/contact").await
    }

    /// `GET /test`: true si el backend responde con un mensaje
    ///
    /// Un único intento con timeout corto, sin pasar por los reintentos.
    pub async fn test_connection(&self) -> bool {
        info!("🔍 Probando conexión con el servidor...");
        let response = self
            .client
            .get(self.config.endpoint("/test"))
            .header(ACCEPT, "application/json")
            .timeout(self.config.connection_test_timeout)
            .send()
            .await
            .map_err(AppError::from_transport);

        let body = match response {
            Ok(response) => read_response(response).await,
            Err(e) => Err(e),
        };

        match body {
            Ok(body) => match body.get("message").and_then(Value::as_str) {
                Some(message) => {
                    info!("✅ Servidor online: {}", message);
                    true
                }
                None => false,
            },
            Err(e) => {
                warn!("❌ Servidor no respondió al test: {}", e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Transporte
    // ------------------------------------------------------------------

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute::<T, ()>(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<T> {
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<T> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute::<T, ()>(Method::DELETE, path, None).await
    }

    async fn execute<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        let large = is_large_endpoint(path);
        let policy = if large { self.retry.for_large_endpoint() } else { self.retry };
        let token = self.bearer_token().await;
        let label = format!("{} {}", method, path);

        let result = with_retry(&policy, &label, || {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(ACCEPT, "application/json");
            if large {
                request = request.timeout(self.config.large_request_timeout);
            }
            if let Some(token) = &token {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            async move {
                let response = request.send().await.map_err(AppError::from_transport)?;
                read_response(response).await
            }
        })
        .await;

        match result {
            Ok(value) => Ok(serde_json::from_value(value)?),
            Err(AppError::Unauthorized(message)) => {
                // token inválido o expirado en el backend
                *self.session.write().await = None;
                Err(AppError::Unauthorized(message))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CarFetcher for StorefrontClient {
    async fn fetch_cars(&self) -> AppResult<Vec<Vehicle>> {
        self.list_cars().await
    }

    async fn fetch_cars_by_type(&self, type_id: &str) -> AppResult<Vec<Vehicle>> {
        self.cars_by_type(type_id).await
    }
}

/// Los endpoints de coches transportan imágenes base64: timeout y esperas mayores
fn is_large_endpoint(path: &str) -> bool {
    path.trim_start_matches('/').starts_with("cars")
}

async fn read_response(response: Response) -> AppResult<Value> {
    let status = response.status();
    let text = response.text().await.map_err(AppError::from_transport)?;
    debug!("📡 Respuesta {} ({} bytes)", status, text.len());

    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_str(&text)?);
    }

    Err(AppError::from_status(status, error_message(status, &text)))
}

/// Extrae el mensaje `{ "error": ... }` del backend, o el cuerpo en crudo
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| Some(body.trim().to_string()).filter(|text| !text.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

/// Lee `exp` del JWT sin verificar la firma (la verifica el backend)
///
/// `Ok(None)` si el token no trae `exp`; `AppError::Token` si no es un JWT.
pub fn token_expiry(token: &str) -> AppResult<Option<DateTime<Utc>>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<JwtClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AppError::Token(e.to_string()))?;
    Ok(data.claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)))
}
