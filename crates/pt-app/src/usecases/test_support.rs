//! Shared fakes for use case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;

use pt_core::catalog::ItemRecord;
use pt_core::ids::{ItemId, SellerId};
use pt_core::order::{OrderReceipt, OrderRequest};
use pt_core::ports::{
    CatalogError, CatalogPort, NavigationPort, Notice, NotificationPort, OrderError, OrderPort,
};

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogPort for Catalog {
        async fn fetch_item(&self, item_id: ItemId) -> Result<ItemRecord, CatalogError>;
    }
}

mock! {
    pub Orders {}

    #[async_trait]
    impl OrderPort for Orders {
        async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, OrderError>;
    }
}

/// Records every notice and navigation instead of showing them.
#[derive(Default)]
pub struct RecordingUi {
    notices: Mutex<Vec<Notice>>,
    routes: Mutex<Vec<String>>,
}

impl RecordingUi {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl NotificationPort for RecordingUi {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

impl NavigationPort for RecordingUi {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub fn item(id: i64, price: u64, status: &str) -> ItemRecord {
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    ItemRecord {
        id: ItemId::new(id),
        weight: "35".into(),
        age: 12,
        price,
        category: "Domba".into(),
        description: format!("Listing {id}"),
        photo_ref: format!("{id}.jpg"),
        availability: status.into(),
        seller_id: SellerId::new(7),
        created_at: stamp,
        updated_at: stamp,
    }
}
