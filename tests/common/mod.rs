#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use redirect_tracker::domain::entities::{
    Hit, Mapping, NewHit, NewMapping, NewRedirectRecord, RedirectRecord,
};
use redirect_tracker::domain::hit_event::HitEvent;
use redirect_tracker::domain::repositories::{
    HitRepository, MappingRepository, RedirectHistoryRepository,
};
use redirect_tracker::error::AppError;
use redirect_tracker::infrastructure::queue::{Delivery, HitQueue, RejectKind};

/// In-memory mapping store, preloaded with ownerless hash→URL entries.
pub struct FakeMappingRepo {
    records: Mutex<Vec<Mapping>>,
}

impl FakeMappingRepo {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let now = Utc::now();
        let records = entries
            .iter()
            .enumerate()
            .map(|(i, (hash, url))| {
                Mapping::new(
                    i as i64 + 1,
                    None,
                    hash.to_string(),
                    url.to_string(),
                    now,
                    now,
                )
            })
            .collect();

        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl MappingRepository for FakeMappingRepo {
    async fn resolve(&self, hash: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.hash == hash)
            .map(|m| m.destination_url.clone()))
    }

    async fn hash_exists(&self, hash: &str) -> Result<bool, AppError> {
        Ok(self.records.lock().unwrap().iter().any(|m| m.hash == hash))
    }

    async fn create(&self, new_mapping: NewMapping) -> Result<Mapping, AppError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|m| m.hash == new_mapping.hash) {
            return Err(AppError::conflict(
                "Hash already exists",
                serde_json::json!({}),
            ));
        }

        let now = Utc::now();
        let mapping = Mapping::new(
            records.len() as i64 + 1,
            new_mapping.owner_id,
            new_mapping.hash,
            new_mapping.destination_url,
            now,
            now,
        );
        records.push(mapping.clone());
        Ok(mapping)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Mapping>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn update_destination(
        &self,
        id: i64,
        owner_id: i64,
        destination_url: &str,
    ) -> Result<Mapping, AppError> {
        let mut records = self.records.lock().unwrap();
        let Some(mapping) = records
            .iter_mut()
            .find(|m| m.id == id && m.owner_id == Some(owner_id))
        else {
            return Err(AppError::not_found(
                "Mapping not found",
                serde_json::json!({ "id": id }),
            ));
        };

        mapping.destination_url = destination_url.to_string();
        mapping.updated_at = Utc::now();
        Ok(mapping.clone())
    }
}

/// Hit store that records every saved hit, assigning sequential ids.
#[derive(Default)]
pub struct RecordingHitRepo {
    hits: Mutex<Vec<Hit>>,
}

impl RecordingHitRepo {
    pub fn saved(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

#[async_trait]
impl HitRepository for RecordingHitRepo {
    async fn save(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let mut hits = self.hits.lock().unwrap();
        let hit = Hit {
            id: hits.len() as i64 + 1,
            timestamp: new_hit.timestamp,
            ip_address: new_hit.ip_address,
            request_url: new_hit.request_url,
            request_method: new_hit.request_method,
            request_headers: new_hit.request_headers,
            processing_status: new_hit.processing_status,
        };
        hits.push(hit.clone());
        Ok(hit)
    }
}

/// Hit store that fails the first save and records every one after that.
///
/// Exercises the requeue-then-succeed redelivery path.
#[derive(Default)]
pub struct FlakyHitRepo {
    failed_once: AtomicBool,
    inner: RecordingHitRepo,
}

impl FlakyHitRepo {
    pub fn saved(&self) -> Vec<Hit> {
        self.inner.saved()
    }
}

#[async_trait]
impl HitRepository for FlakyHitRepo {
    async fn save(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(AppError::internal(
                "Database error",
                serde_json::json!({}),
            ));
        }
        self.inner.save(new_hit).await
    }
}

/// History store that records every saved redirect record.
#[derive(Default)]
pub struct RecordingHistoryRepo {
    records: Mutex<Vec<RedirectRecord>>,
}

impl RecordingHistoryRepo {
    pub fn saved(&self) -> Vec<RedirectRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedirectHistoryRepository for RecordingHistoryRepo {
    async fn save(&self, record: NewRedirectRecord) -> Result<RedirectRecord, AppError> {
        let mut records = self.records.lock().unwrap();
        let saved = RedirectRecord {
            id: records.len() as i64 + 1,
            hit_id: record.hit_id,
            original_url: record.original_url,
            redirect_url: record.redirect_url,
            redirect_type: record.redirect_type,
            redirect_status: record.redirect_status,
            redirect_timestamp: record.redirect_timestamp,
        };
        records.push(saved.clone());
        Ok(saved)
    }
}

/// Queue whose publish always fails, for exercising the 500 path.
pub struct FailingQueue;

#[async_trait]
impl HitQueue for FailingQueue {
    async fn publish(&self, _event: &HitEvent) -> Result<(), AppError> {
        Err(AppError::internal(
            "Queue unavailable",
            serde_json::json!({}),
        ))
    }

    async fn claim(&self, _batch: i64) -> Result<Vec<Delivery>, AppError> {
        Ok(Vec::new())
    }

    async fn ack(&self, _delivery: &Delivery) -> Result<(), AppError> {
        Ok(())
    }

    async fn reject(
        &self,
        _delivery: &Delivery,
        _kind: RejectKind,
        _reason: &str,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn depth(&self) -> Result<i64, AppError> {
        Err(AppError::internal(
            "Queue unavailable",
            serde_json::json!({}),
        ))
    }
}

/// Injects a fixed client address, standing in for
/// `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
