//! In-memory repository shared by the list tests

use crate::error::ApiErrorBody;
use crate::repository::{CrudOperation, Repository};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use http::StatusCode;
use shared::EntityState;
use shared::models::{Brand, BrandCreate, BrandUpdate};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

pub(crate) fn brand(id: i64, name: &str, state: EntityState) -> Brand {
    Brand {
        id,
        name: name.to_string(),
        state,
    }
}

pub(crate) fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status: StatusCode::from_u16(status).unwrap(),
        body: ApiErrorBody {
            message: Some(message.to_string()),
            ..Default::default()
        },
    }
}

pub(crate) struct FakeBrands {
    pub items: Mutex<Vec<Brand>>,
    pub next_id: AtomicI64,
    pub calls: AtomicUsize,
    pub failure: Mutex<Option<(u16, String)>>,
    pub hang: AtomicBool,
    pub stateful: bool,
}

impl FakeBrands {
    pub fn new(items: Vec<Brand>) -> Self {
        let next_id = items.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            items: Mutex::new(items),
            next_id: AtomicI64::new(next_id),
            calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
            hang: AtomicBool::new(false),
            stateful: true,
        }
    }

    /// Without `update_state` and `delete`
    pub fn read_write_only(items: Vec<Brand>) -> Self {
        Self {
            stateful: false,
            ..Self::new(items)
        }
    }

    pub fn fail_next(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        match self.failure.lock().unwrap().take() {
            Some((status, message)) => Err(api_error(status, &message)),
            None => Ok(()),
        }
    }

    fn find(&self, id: i64) -> ClientResult<Brand> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| api_error(404, "Marca no encontrada"))
    }
}

#[async_trait]
impl Repository for FakeBrands {
    type Entity = Brand;
    type Create = BrandCreate;
    type Update = BrandUpdate;

    async fn list(&self) -> ClientResult<Vec<Brand>> {
        self.enter().await?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Brand> {
        self.enter().await?;
        self.find(id)
    }

    async fn create(&self, data: &BrandCreate) -> ClientResult<Brand> {
        self.enter().await?;
        let created = brand(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            &data.name,
            EntityState::Active,
        );
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, data: &BrandUpdate) -> ClientResult<Brand> {
        self.enter().await?;
        let mut items = self.items.lock().unwrap();
        let brand = items
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| api_error(404, "Marca no encontrada"))?;
        if let Some(name) = &data.name {
            brand.name = name.clone();
        }
        Ok(brand.clone())
    }

    fn supports(&self, op: CrudOperation) -> bool {
        self.stateful || !matches!(op, CrudOperation::UpdateState | CrudOperation::Delete)
    }

    async fn update_state(&self, id: i64, state: EntityState) -> ClientResult<Brand> {
        self.enter().await?;
        let mut items = self.items.lock().unwrap();
        let brand = items
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| api_error(404, "Marca no encontrada"))?;
        brand.state = state;
        Ok(brand.clone())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.enter().await?;
        self.find(id)?;
        self.items.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }
}
