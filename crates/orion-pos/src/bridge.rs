//! # POS Bridge
//!
//! Keeps the local catalog and the point-of-sale system in step: pushes
//! products out, pulls sales and stock levels back, and turns what it
//! learns into dashboard notifications.
//!
//! ## Sales Pull
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sync_sales_from_pos()                                                  │
//! │                                                                         │
//! │   signed in? ──no──► NotAuthenticated                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   mark = now                                                            │
//! │   GET /sales?wholesalerId=&fromDate=<sales cursor>                      │
//! │       │ error ──► emit_error, local state untouched                     │
//! │       ▼                                                                 │
//! │   for each sale not applied yet:                                        │
//! │       for each item: stock -= qty (floor 0)                             │
//! │                      stock <= min? ──► LowStock notification (high)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   any sales? ──► System summary (medium) ──► POST /sales/acknowledge    │
//! │       │                                      (failure only logged)      │
//! │       ▼                                                                 │
//! │   sales cursor = mark, last_pos_sync = now                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sales cursor is separate from `last_pos_sync`: a catalog push moves
//! the latter but never the former. Sales landing while a pull is in flight
//! come back on the next pull and the applied-id guard skips the overlap.
//!
//! ## Connection States
//! ```text
//!   Checking ──health ok──► Connected
//!       │
//!       └────health err───► Disconnected
//! ```
//! Only `Connected` allows a catalog push; pulls work in any state.
//!
//! The domain store lock is never held across an `.await`.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use orion_core::{Money, NewNotification, NotificationType, Priority, ProductPatch};
use orion_store::{
    DomainStore, KeyValueStore, SessionStore, StockChange, StoreHandle, LAST_POS_SYNC_KEY,
    POS_SALES_CURSOR_KEY,
};

use crate::client::PosApi;
use crate::error::{PosError, PosResult};
use crate::events::{NoOpEmitter, PosEventEmitter};
use crate::protocol::{PosProduct, PosSale, StockLevel, WEBHOOK_EVENTS};
use crate::webhook::PosWebhookEvent;

// =============================================================================
// Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Checking => write!(f, "checking"),
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Snapshot of the bridge for status displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PosStatus {
    pub connection: ConnectionStatus,
    pub is_syncing: bool,
    /// ISO-8601 time of the last successful push or pull.
    pub last_sync: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct BridgeState {
    connection: ConnectionStatus,
    last_sync: Option<String>,
    /// `fromDate` of the next sales pull.
    sales_cursor: Option<String>,
    last_error: Option<String>,
}

/// What one sales pull changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesSyncReport {
    /// Sales applied to local stock.
    pub sales: usize,
    pub revenue: Money,
    /// Sales already applied earlier and skipped.
    pub duplicates: usize,
    pub low_stock_alerts: usize,
    /// Sale lines naming a product this catalog does not have.
    pub unknown_products: usize,
    pub acknowledged: bool,
}

/// Clears the syncing flag when dropped, including on cancellation.
struct SyncingGuard<'a>(&'a AtomicBool);

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sale ids remembered by the redelivery guard.
const APPLIED_SALES_CAPACITY: usize = 10_000;

/// Bounded set of applied sale ids. The oldest id is forgotten first.
#[derive(Debug)]
struct AppliedSales {
    ids: HashSet<String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl AppliedSales {
    fn with_capacity(capacity: usize) -> Self {
        AppliedSales {
            ids: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns false when `id` was already recorded.
    fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
        self.ids.insert(id.to_string());
        self.order.push_back(id.to_string());
        true
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

// =============================================================================
// Bridge
// =============================================================================

pub struct PosBridge {
    api: Arc<dyn PosApi>,
    store: StoreHandle,
    session: Arc<SessionStore>,
    kv: Arc<dyn KeyValueStore>,
    emitter: Arc<dyn PosEventEmitter>,

    /// Used instead of the signed-in user's id when set.
    wholesaler_id: Option<String>,

    state: RwLock<BridgeState>,
    syncing: AtomicBool,

    /// Serializes pushes and pulls so two ticks never read the same
    /// `last_pos_sync`.
    sync_gate: tokio::sync::Mutex<()>,

    /// Sale ids applied by this process.
    applied_sales: Mutex<AppliedSales>,
}

impl std::fmt::Debug for PosBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosBridge")
            .field("wholesaler_id", &self.wholesaler_id)
            .field("syncing", &self.syncing)
            .finish_non_exhaustive()
    }
}

impl PosBridge {
    /// Creates a bridge. The last sync time and the sales cursor are
    /// restored from `kv`; without a stored cursor the first pull starts at
    /// the last sync time.
    pub fn new(
        api: Arc<dyn PosApi>,
        store: StoreHandle,
        session: Arc<SessionStore>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        let restore = |key: &str| match kv.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Could not read POS sync slot");
                None
            }
        };
        let last_sync = restore(LAST_POS_SYNC_KEY);
        let sales_cursor = restore(POS_SALES_CURSOR_KEY).or_else(|| last_sync.clone());

        PosBridge {
            api,
            store,
            session,
            kv,
            emitter: Arc::new(NoOpEmitter),
            wholesaler_id: None,
            state: RwLock::new(BridgeState {
                last_sync,
                sales_cursor,
                ..Default::default()
            }),
            syncing: AtomicBool::new(false),
            sync_gate: tokio::sync::Mutex::new(()),
            applied_sales: Mutex::new(AppliedSales::with_capacity(APPLIED_SALES_CAPACITY)),
        }
    }

    pub fn with_emitter(mut self, emitter: Arc<dyn PosEventEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn with_wholesaler_id(mut self, wholesaler_id: Option<String>) -> Self {
        self.wholesaler_id = wholesaler_id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub async fn status(&self) -> PosStatus {
        let state = self.state.read().await;
        PosStatus {
            connection: state.connection,
            is_syncing: self.is_syncing(),
            last_sync: state.last_sync.clone(),
            last_error: state.last_error.clone(),
        }
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        self.state.read().await.connection
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    pub async fn last_sync_time(&self) -> Option<String> {
        self.state.read().await.last_sync.clone()
    }

    // =========================================================================
    // Connection
    // =========================================================================

    /// One health probe. Never retries; the scheduler decides when to ask
    /// again.
    pub async fn test_connection(&self) -> bool {
        self.set_connection(ConnectionStatus::Checking).await;

        let connected = match self.api.health().await {
            Ok(health) => {
                debug!(status = %health.status, "POS health ok");
                true
            }
            Err(e) => {
                warn!(error = %e, "POS health check failed");
                self.state.write().await.last_error = Some(e.user_message());
                false
            }
        };

        let next = if connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        };
        self.set_connection(next).await;
        connected
    }

    // =========================================================================
    // Catalog Push
    // =========================================================================

    /// Pushes the whole catalog. Returns how many products were sent.
    pub async fn sync_products_to_pos(&self) -> PosResult<usize> {
        if self.connection_status().await != ConnectionStatus::Connected {
            return Err(PosError::NotConnected);
        }
        let wholesaler_id = self.wholesaler_id()?;

        let _gate = self.sync_gate.lock().await;
        let products: Vec<PosProduct> = self
            .lock_store()
            .products()
            .iter()
            .map(|p| PosProduct::from_product(p, &wholesaler_id))
            .collect();

        let syncing = self.begin_sync().await;
        let result = self.push_catalog(&products).await;
        self.end_sync(syncing).await;
        result
    }

    async fn push_catalog(&self, products: &[PosProduct]) -> PosResult<usize> {
        let count = products.len();
        if let Err(e) = self.api.sync_products(products).await {
            self.report_error("POS sync failed", &e).await;
            return Err(e);
        }

        self.record_sync_time().await;
        self.lock_store().add_notification(NewNotification::new(
            NotificationType::System,
            Priority::Low,
            "POS Sync Completed",
            format!("{count} products synced to POS system"),
            Utc::now(),
        ));
        self.emitter
            .emit_success(&format!("{count} products synced to POS successfully!"));
        info!(count, "Catalog pushed to POS");
        Ok(count)
    }

    /// Pushes a single product.
    pub async fn sync_product_to_pos(&self, product_id: &str) -> PosResult<()> {
        let wholesaler_id = self.wholesaler_id()?;
        let product = self
            .lock_store()
            .product(product_id)
            .map(|p| PosProduct::from_product(p, &wholesaler_id))
            .ok_or_else(|| PosError::ProductNotFound(product_id.to_string()))?;

        match self.api.sync_product(&product).await {
            Ok(()) => {
                self.emitter
                    .emit_success(&format!("{} synced to POS", product.name));
                Ok(())
            }
            Err(e) => {
                self.report_error(&format!("Failed to sync {}", product.name), &e)
                    .await;
                Err(e)
            }
        }
    }

    // =========================================================================
    // Sales Pull
    // =========================================================================

    /// Pulls sales since the last sync and applies them to local stock.
    ///
    /// Works in any connection state; the scheduler only calls it while
    /// connected.
    pub async fn sync_sales_from_pos(&self) -> PosResult<SalesSyncReport> {
        let wholesaler_id = self.wholesaler_id()?;

        let _gate = self.sync_gate.lock().await;
        let syncing = self.begin_sync().await;
        let result = self.pull_sales(&wholesaler_id).await;
        self.end_sync(syncing).await;
        result
    }

    async fn pull_sales(&self, wholesaler_id: &str) -> PosResult<SalesSyncReport> {
        let since = self.state.read().await.sales_cursor.clone();
        let mark = Utc::now();

        let sales = match self.api.sales(wholesaler_id, since.as_deref()).await {
            Ok(sales) => sales,
            Err(e) => {
                self.report_error("Failed to sync sales from POS", &e).await;
                return Err(e);
            }
        };

        let mut report = self.apply_sales(&sales);

        if report.sales > 0 {
            self.lock_store().add_notification(
                NewNotification::new(
                    NotificationType::System,
                    Priority::Medium,
                    "POS Sales Synced",
                    format!(
                        "{} sales synced from POS system. Revenue: {}",
                        report.sales, report.revenue
                    ),
                    Utc::now(),
                )
                .with_amount(report.revenue),
            );
            self.emitter.emit_success(&format!(
                "Synced {} sales from POS ({})",
                report.sales, report.revenue
            ));
        }

        if !sales.is_empty() {
            let ids: Vec<String> = sales.iter().map(|s| s.id.clone()).collect();
            match self.api.acknowledge_sales(&ids).await {
                Ok(()) => report.acknowledged = true,
                Err(e) => warn!(error = %e, count = ids.len(), "Failed to acknowledge POS sales"),
            }
        }

        self.advance_sales_cursor(mark).await;
        self.record_sync_time().await;
        info!(
            sales = report.sales,
            duplicates = report.duplicates,
            low_stock = report.low_stock_alerts,
            "POS sales pulled"
        );
        Ok(report)
    }

    fn apply_sales(&self, sales: &[PosSale]) -> SalesSyncReport {
        let mut applied = self
            .applied_sales
            .lock()
            .unwrap_or_else(|p| p.into_inner());
        let mut store = self.lock_store();
        let mut report = SalesSyncReport::default();

        for sale in sales {
            if !applied.insert(&sale.id) {
                debug!(sale_id = %sale.id, "Sale already applied, skipping");
                report.duplicates += 1;
                continue;
            }
            report.sales += 1;
            report.revenue += sale.total_money();

            for item in &sale.products {
                match store.decrement_stock(&item.product_id, item.quantity) {
                    Some(change) if change.is_low() => {
                        store.add_notification(low_stock_after_sale(&change));
                        report.low_stock_alerts += 1;
                    }
                    Some(_) => {}
                    None => {
                        debug!(product_id = %item.product_id, "Sale names unknown product");
                        report.unknown_products += 1;
                    }
                }
            }
        }

        debug!(remembered = applied.len(), "Applied sale ids");
        report
    }

    // =========================================================================
    // Stock Pull
    // =========================================================================

    /// Overwrites local stock with the POS's levels. Returns how many
    /// products changed.
    pub async fn pull_stock_updates(&self) -> PosResult<usize> {
        let wholesaler_id = self.wholesaler_id()?;

        let levels = match self.api.stock_updates(&wholesaler_id).await {
            Ok(levels) => levels,
            Err(e) => {
                self.report_error("Failed to pull stock from POS", &e).await;
                return Err(e);
            }
        };

        let changed = apply_stock_levels(&mut self.lock_store(), &levels);
        info!(received = levels.len(), changed, "POS stock levels applied");
        Ok(changed)
    }

    // =========================================================================
    // Webhooks
    // =========================================================================

    /// Registers `url` for push events. An empty `events` subscribes to all.
    pub async fn setup_webhook(&self, url: &str, events: &[String]) -> PosResult<()> {
        let events: Vec<String> = if events.is_empty() {
            WEBHOOK_EVENTS.iter().map(|e| e.to_string()).collect()
        } else {
            events.to_vec()
        };

        match self.api.setup_webhook(url, &events).await {
            Ok(()) => {
                info!(url = %url, ?events, "POS webhook registered");
                Ok(())
            }
            Err(e) => {
                self.report_error("Failed to register POS webhook", &e).await;
                Err(e)
            }
        }
    }

    /// Applies a pushed event. Returns true when local state changed.
    pub fn handle_webhook(&self, event: PosWebhookEvent) -> bool {
        match event {
            PosWebhookEvent::SaleCompleted(sale) => {
                let report = self.apply_sales(std::slice::from_ref(&sale));
                report.sales > 0
            }
            PosWebhookEvent::StockUpdated(levels) => {
                apply_stock_levels(&mut self.lock_store(), &levels) > 0
            }
            PosWebhookEvent::ProductAdded(product) => {
                self.lock_store().insert_product(product.into_product())
            }
            PosWebhookEvent::Unknown(kind) => {
                info!(kind = %kind, "Unknown POS webhook event");
                false
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_store(&self) -> MutexGuard<'_, DomainStore> {
        self.store.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn wholesaler_id(&self) -> PosResult<String> {
        let user = self
            .session
            .current_user()
            .ok_or(PosError::NotAuthenticated)?;
        Ok(self.wholesaler_id.clone().unwrap_or(user.id))
    }

    async fn set_connection(&self, connection: ConnectionStatus) {
        self.state.write().await.connection = connection;
        self.emit_status().await;
    }

    async fn begin_sync(&self) -> SyncingGuard<'_> {
        self.syncing.store(true, Ordering::SeqCst);
        self.emit_status().await;
        SyncingGuard(&self.syncing)
    }

    async fn end_sync(&self, guard: SyncingGuard<'_>) {
        drop(guard);
        self.emit_status().await;
    }

    async fn advance_sales_cursor(&self, mark: DateTime<Utc>) {
        let mark = mark.to_rfc3339();
        if let Err(e) = self.kv.set(POS_SALES_CURSOR_KEY, &mark) {
            warn!(error = %e, "Failed to persist POS sales cursor");
        }
        self.state.write().await.sales_cursor = Some(mark);
    }

    async fn record_sync_time(&self) {
        let now = Utc::now().to_rfc3339();
        if let Err(e) = self.kv.set(LAST_POS_SYNC_KEY, &now) {
            warn!(error = %e, "Failed to persist last POS sync time");
        }
        {
            let mut state = self.state.write().await;
            state.last_sync = Some(now);
            state.last_error = None;
        }
        self.emit_status().await;
    }

    async fn report_error(&self, context: &str, error: &PosError) {
        let message = format!("{context}: {}", error.user_message());
        warn!(error = %error, "{}", context);
        self.state.write().await.last_error = Some(message.clone());
        self.emitter.emit_error(&message, error.is_retryable());
    }

    async fn emit_status(&self) {
        let status = self.status().await;
        self.emitter.emit_status(&status);
    }
}

fn low_stock_after_sale(change: &StockChange) -> NewNotification {
    NewNotification::new(
        NotificationType::LowStock,
        Priority::High,
        "Low Stock Alert from POS",
        format!(
            "{} is running low after POS sale ({} remaining)",
            change.product_name, change.current
        ),
        Utc::now(),
    )
    .with_product(change.product_name.clone())
}

/// Sets absolute stock levels. A product that drops to its reorder
/// threshold from above raises a low-stock notification.
fn apply_stock_levels(store: &mut DomainStore, levels: &[StockLevel]) -> usize {
    let mut changed = 0;
    for level in levels {
        let Some(product) = store.product(&level.product_id) else {
            debug!(product_id = %level.product_id, "Stock update for unknown product");
            continue;
        };
        let stock = level.clamped();
        if product.stock == stock {
            continue;
        }
        let was_low = product.is_low_stock();
        let name = product.name.clone();
        let min_stock = product.min_stock;

        store.update_product(&level.product_id, ProductPatch::stock(stock));
        changed += 1;

        if !was_low && stock <= min_stock {
            store.add_notification(
                NewNotification::new(
                    NotificationType::LowStock,
                    Priority::High,
                    "Low Stock Alert from POS",
                    format!("{name} is running low ({stock} remaining)"),
                    Utc::now(),
                )
                .with_product(name),
            );
        }
    }
    changed
}
