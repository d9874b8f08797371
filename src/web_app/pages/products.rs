// web_app/pages/products.rs - Product management screen controller
//
// Owns the view state of the products page and maps user interactions
// (clicks, search input, confirmation answers) onto gateway calls.
//
// All methods take `&self`: state sits behind a mutex that is never held
// across an await, so interactions may overlap. Responses that replace the
// list carry a ticket and are dropped when a newer list request exists.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::web_app::api::{GatewayError, GatewayResult, HttpProductGateway, ProductGateway};
use crate::web_app::components::{ConfirmationService, ToastQueue};
use crate::web_app::model::*;

pub const MSG_CREATED: &str = "Product Created";
pub const MSG_UPDATED: &str = "Product Updated";
pub const MSG_DELETED: &str = "Product Deleted";
pub const MSG_CREATE_FAILED: &str = "Could not create the product";
pub const MSG_UPDATE_FAILED: &str = "Could not update the product";
pub const MSG_DELETE_FAILED: &str = "Could not delete the product";
pub const MSG_LOAD_FAILED: &str = "Could not load the products";
pub const MSG_FILTER_FAILED: &str = "Could not filter the products";
pub const MSG_EDIT_FAILED: &str = "Could not open the product for editing";

/// What happened to a list-replacing request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOutcome {
    /// The list now holds this many products
    Applied(usize),
    /// A newer request superseded this one before it was sent
    Skipped,
    /// The response arrived after a newer request was issued
    Stale,
    Failed,
}

#[derive(Debug)]
pub enum SaveOutcome {
    Created(Product),
    Updated(Product),
    Rejected(ValidationError),
    /// A previous save has not completed yet
    Busy,
    Failed(GatewayError),
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    MissingId,
    Failed(GatewayError),
}

#[derive(Debug)]
struct PageState {
    products: Vec<Product>,
    draft: ProductDraft,
    dialog_open: bool,
    submitted: bool,
    loading: bool,
    saving: bool,
    toasts: ToastQueue,
    list_ticket: u64,
}

impl PageState {
    fn new(toast_life: Duration) -> Self {
        Self {
            products: Vec::new(),
            draft: ProductDraft::default(),
            dialog_open: false,
            submitted: false,
            loading: true,
            saving: false,
            toasts: ToastQueue::new(toast_life),
            list_ticket: 0,
        }
    }

    fn next_ticket(&mut self) -> u64 {
        self.list_ticket += 1;
        self.list_ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.list_ticket == ticket
    }

    fn insert_created(&mut self, product: Product) {
        self.products.insert(0, product);
    }

    /// Replace the entry with the same id; unknown ids leave the list as is
    fn replace_updated(&mut self, product: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id.is_some() && p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    fn remove_by_id(&mut self, id: i64) -> usize {
        let before = self.products.len();
        self.products.retain(|p| p.id != Some(id));
        before - self.products.len()
    }
}

/// Controller behind the product management screen
pub struct ProductsController {
    gateway: Arc<dyn ProductGateway>,
    confirmations: Arc<dyn ConfirmationService>,
    search_debounce: Duration,
    state: Mutex<PageState>,
}

impl ProductsController {
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        confirmations: Arc<dyn ConfirmationService>,
        config: &AppConfig,
    ) -> Self {
        Self {
            gateway,
            confirmations,
            search_debounce: config.search_debounce,
            state: Mutex::new(PageState::new(config.toast_life)),
        }
    }

    /// Controller talking HTTP to the configured products endpoint
    pub fn from_config(
        config: &AppConfig,
        confirmations: Arc<dyn ConfirmationService>,
    ) -> GatewayResult<Self> {
        let gateway = HttpProductGateway::from_config(config)?;
        Ok(Self::new(Arc::new(gateway), confirmations, config))
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Startup: load the full list
    pub async fn init(&self) -> ListOutcome {
        tracing::info!("Initializing products page");
        self.load_products().await
    }

    /// Reload the full, unfiltered product list
    pub async fn load_products(&self) -> ListOutcome {
        let ticket = {
            let mut state = self.lock();
            state.loading = true;
            state.next_ticket()
        };
        self.refresh(ticket, None).await
    }

    /// Search-as-you-type: filter by name, or reload everything when blank
    pub async fn on_search_change(&self, input: InputChange) -> ListOutcome {
        let ticket = self.lock().next_ticket();

        if !self.search_debounce.is_zero() {
            tokio::time::sleep(self.search_debounce).await;
            if !self.lock().is_current(ticket) {
                tracing::debug!("Search '{}' superseded while debouncing", input.value);
                return ListOutcome::Skipped;
            }
        }

        self.refresh(ticket, input.search_term()).await
    }

    async fn refresh(&self, ticket: u64, term: Option<&str>) -> ListOutcome {
        let result = match term {
            Some(name) => self.gateway.filter_by_name(name).await,
            None => self.gateway.list().await,
        };

        let mut state = self.lock();
        if !state.is_current(ticket) {
            tracing::debug!("Dropping stale list response (ticket {} < {})", ticket, state.list_ticket);
            return ListOutcome::Stale;
        }
        state.loading = false;

        match result {
            Ok(products) => {
                let count = products.len();
                state.products = products;
                tracing::debug!("Product list replaced with {} entries", count);
                ListOutcome::Applied(count)
            }
            Err(e) => {
                let detail = if term.is_some() { MSG_FILTER_FAILED } else { MSG_LOAD_FAILED };
                tracing::error!("{}: {}", detail, e);
                state.toasts.error(detail);
                ListOutcome::Failed
            }
        }
    }

    /// Open the dialog with an empty product
    pub fn open_new(&self) {
        let mut state = self.lock();
        state.submitted = false;
        state.draft = ProductDraft::default();
        state.dialog_open = true;
    }

    /// Fetch the product and open the dialog on it
    pub async fn edit_product(&self, id: i64) -> bool {
        match self.gateway.get_by_id(id).await {
            Ok(product) => {
                let mut state = self.lock();
                state.draft = ProductDraft::from(product);
                state.dialog_open = true;
                true
            }
            Err(e) => {
                tracing::error!("{} {}: {}", MSG_EDIT_FAILED, id, e);
                self.lock().toasts.error(MSG_EDIT_FAILED);
                false
            }
        }
    }

    /// Apply an edit to the dialog's draft
    pub fn update_draft<F>(&self, edit: F)
    where
        F: FnOnce(&mut ProductDraft),
    {
        edit(&mut self.lock().draft);
    }

    /// Validate the draft and create or update it
    ///
    /// The dialog closes as soon as the request is issued. If the request
    /// fails, the dialog reopens with the draft unless another one has been
    /// opened meanwhile.
    pub async fn save_product(&self) -> SaveOutcome {
        let (product, draft) = {
            let mut state = self.lock();
            if state.saving {
                tracing::debug!("Save ignored, previous save still in flight");
                return SaveOutcome::Busy;
            }
            state.submitted = true;

            match state.draft.validate() {
                Ok(product) => {
                    state.saving = true;
                    state.dialog_open = false;
                    (product, state.draft.clone())
                }
                Err(e) => {
                    tracing::debug!("Draft rejected: {}", e);
                    state.toasts.error(e.to_string());
                    return SaveOutcome::Rejected(e);
                }
            }
        };

        let outcome = match product.id {
            Some(id) => match self.gateway.update(id, &product).await {
                Ok(mut updated) => {
                    updated.id = updated.id.or(Some(id));
                    let mut state = self.lock();
                    if !state.replace_updated(updated.clone()) {
                        tracing::debug!("Updated product {} is not in the current list", id);
                    }
                    state.toasts.success(MSG_UPDATED);
                    SaveOutcome::Updated(updated)
                }
                Err(e) => {
                    tracing::error!("{} {}: {}", MSG_UPDATE_FAILED, id, e);
                    SaveOutcome::Failed(e)
                }
            },
            None => match self.gateway.create(&product).await {
                Ok(created) => {
                    let mut state = self.lock();
                    state.insert_created(created.clone());
                    state.toasts.success(MSG_CREATED);
                    SaveOutcome::Created(created)
                }
                Err(e) => {
                    tracing::error!("{}: {}", MSG_CREATE_FAILED, e);
                    SaveOutcome::Failed(e)
                }
            },
        };

        let mut state = self.lock();
        state.saving = false;
        if let SaveOutcome::Failed(_) = outcome {
            let detail = if draft.is_new() { MSG_CREATE_FAILED } else { MSG_UPDATE_FAILED };
            state.toasts.error(detail);
            if !state.dialog_open {
                state.draft = draft;
                state.dialog_open = true;
            }
        }
        outcome
    }

    /// Ask for confirmation, then delete on the server and from the list
    pub async fn delete_product(&self, product: &Product) -> DeleteOutcome {
        let Some(id) = product.id else {
            tracing::warn!("Cannot delete '{}': it has no id", product.name);
            return DeleteOutcome::MissingId;
        };

        let prompt = Confirmation::delete_product(&product.name);
        if !self.confirmations.confirm(&prompt).await {
            tracing::debug!("Deletion of product {} declined", id);
            return DeleteOutcome::Declined;
        }

        match self.gateway.delete(id).await {
            Ok(()) => {
                let mut state = self.lock();
                if state.remove_by_id(id) == 0 {
                    tracing::debug!("Deleted product {} was not in the current list", id);
                }
                state.toasts.success(MSG_DELETED);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!("{} {}: {}", MSG_DELETE_FAILED, id, e);
                self.lock().toasts.error(MSG_DELETE_FAILED);
                DeleteOutcome::Failed(e)
            }
        }
    }

    /// Close the dialog without saving
    pub fn hide_dialog(&self) {
        let mut state = self.lock();
        state.dialog_open = false;
        state.submitted = false;
        state.draft = ProductDraft::default();
    }

    /// Snapshot for rendering; expired toasts are dropped first
    pub fn view(&self) -> ViewState {
        let now = Utc::now();
        let mut state = self.lock();
        state.toasts.prune(now);

        ViewState {
            products: state.products.clone(),
            draft: state.draft.clone(),
            dialog_open: state.dialog_open,
            submitted: state.submitted,
            loading: state.loading,
            saving: state.saving,
            toasts: state.toasts.active(now),
        }
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn dismiss_toast(&self, id: Uuid) -> bool {
        self.lock().toasts.dismiss(id)
    }

    pub fn prune_toasts(&self) -> usize {
        self.lock().toasts.prune(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            description: "d".to_string(),
            price: Decimal::new(5, 0),
            quantity: 2,
        }
    }

    fn state_with(products: Vec<Product>) -> PageState {
        let mut state = PageState::new(Duration::from_millis(3000));
        state.products = products;
        state
    }

    #[test]
    fn test_initial_state() {
        let state = PageState::new(Duration::from_millis(3000));
        assert!(state.loading);
        assert!(!state.dialog_open);
        assert!(state.products.is_empty());
        assert_eq!(state.list_ticket, 0);
    }

    #[test]
    fn test_tickets_increase() {
        let mut state = state_with(vec![]);
        let first = state.next_ticket();
        let second = state.next_ticket();
        assert!(second > first);
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_insert_created_goes_first() {
        let mut state = state_with(vec![product(1, "A")]);
        state.insert_created(product(99, "B"));
        assert_eq!(state.products[0].id, Some(99));
        assert_eq!(state.products.len(), 2);
    }

    #[test]
    fn test_replace_updated_in_place() {
        let mut state = state_with(vec![product(1, "A"), product(2, "B")]);
        assert!(state.replace_updated(product(2, "B2")));
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[1].name, "B2");
    }

    #[test]
    fn test_replace_unknown_is_noop() {
        let mut state = state_with(vec![product(1, "A")]);
        assert!(!state.replace_updated(product(5, "Z")));
        assert_eq!(state.products, vec![product(1, "A")]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut state = state_with(vec![product(1, "A"), product(2, "B")]);
        assert_eq!(state.remove_by_id(1), 1);
        assert_eq!(state.remove_by_id(1), 0);
        assert_eq!(state.products, vec![product(2, "B")]);
    }
}
