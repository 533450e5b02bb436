//! Add/edit form buffer and payload coercion.
//!
//! [`FormController`] owns the raw text the user typed and the form mode. It turns
//! that text into a typed [`Product`] for the store and resets itself only after
//! the store reports success, so a failed submit can be retried without
//! re-entering anything.

use super::modes::FormMode;
use super::store::ProductStore;
use crate::domain::{InventoryError, Product, ProductField, ProductId, Result};
use crate::notify::{Channel, Notifier};
use crate::remote::ProductRemote;

/// Raw, uncoerced form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub category: String,
}

impl FormState {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            category: product.category.clone(),
        }
    }

    /// Raw text of `field`.
    #[must_use]
    pub fn field(&self, field: ProductField) -> &str {
        match field {
            ProductField::Id => &self.id,
            ProductField::Name => &self.name,
            ProductField::Description => &self.description,
            ProductField::Price => &self.price,
            ProductField::Quantity => &self.quantity,
            ProductField::Category => &self.category,
        }
    }

    fn field_mut(&mut self, field: ProductField) -> &mut String {
        match field {
            ProductField::Id => &mut self.id,
            ProductField::Name => &mut self.name,
            ProductField::Description => &mut self.description,
            ProductField::Price => &mut self.price,
            ProductField::Quantity => &mut self.quantity,
            ProductField::Category => &mut self.category,
        }
    }
}

/// Form state machine for creating and editing products.
#[derive(Debug)]
pub struct FormController {
    state: FormState,
    mode: FormMode,
    notifier: Notifier,
}

impl FormController {
    /// Creates an empty form in create mode.
    #[must_use]
    pub fn new(notifier: Notifier) -> Self {
        Self {
            state: FormState::default(),
            mode: FormMode::Create,
            notifier,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Loads `product` into the form and binds the form to its id.
    ///
    /// Clears any inline message.
    pub fn begin_edit(&mut self, product: &Product) {
        tracing::debug!(id = product.id, "editing product");
        self.state = FormState::from_product(product);
        self.mode = FormMode::Edit { id: product.id };
        self.notifier.clear(Channel::Inline);
    }

    /// Sets the raw text of `field`.
    ///
    /// Returns `false` without changing anything when the field is locked
    /// (the id while editing).
    pub fn set_field(&mut self, field: ProductField, value: impl Into<String>) -> bool {
        if field == ProductField::Id && self.mode.is_edit() {
            tracing::debug!("id field is locked while editing");
            return false;
        }
        *self.state.field_mut(field) = value.into();
        true
    }

    /// Empties the form and returns to create mode.
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.mode = FormMode::Create;
    }

    /// Abandons the current edit: resets and clears the inline message.
    pub fn cancel(&mut self) {
        self.reset();
        self.notifier.clear(Channel::Inline);
    }

    /// Coerces the form into a typed product.
    ///
    /// In edit mode the bound id is used and the id text is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] naming the first field that is
    /// empty when required or that does not parse as its numeric type.
    pub fn build_payload(&self) -> Result<Product> {
        let id = match self.mode {
            FormMode::Edit { id } => id,
            FormMode::Create => parse_id(required(ProductField::Id, &self.state.id)?)?,
        };
        let name = required(ProductField::Name, &self.state.name)?;
        let price = parse_price(required(ProductField::Price, &self.state.price)?)?;
        let quantity = parse_quantity(required(ProductField::Quantity, &self.state.quantity)?)?;
        let category = required(ProductField::Category, &self.state.category)?;

        Ok(Product {
            id,
            name: name.to_string(),
            description: self.state.description.clone(),
            price,
            quantity,
            category: category.to_string(),
        })
    }

    /// Builds the payload and sends it through `store`.
    ///
    /// Validation failures raise an inline error and never reach the store.
    /// The form is reset only if the store succeeds.
    ///
    /// # Errors
    ///
    /// Returns the validation error or the store's error.
    pub async fn submit<R: ProductRemote>(&mut self, store: &mut ProductStore<R>) -> Result<Product> {
        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "form rejected");
                self.notifier.error(Channel::Inline, e.user_message("Invalid input"));
                return Err(e);
            }
        };

        self.notifier.clear(Channel::Inline);

        let result = match self.mode {
            FormMode::Create => store.create(&payload).await,
            FormMode::Edit { id } => store.update(id, &payload).await,
        };

        if result.is_ok() {
            self.reset();
        }
        result
    }
}

/// Returns the trimmed value or a validation error if it is empty.
fn required(field: ProductField, value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(field, "is required"));
    }
    Ok(trimmed)
}

/// Largest magnitude at which every whole `f64` is exact.
const EXACT_F64_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Parses a whole number, also accepting integral decimals such as "5.0".
fn parse_whole(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    match value.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && n.abs() <= EXACT_F64_INTEGER => Some(n as i64),
        _ => None,
    }
}

fn parse_id(value: &str) -> Result<ProductId> {
    parse_whole(value)
        .ok_or_else(|| InventoryError::validation(ProductField::Id, format!("{value:?} is not a whole number")))
}

fn parse_price(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(InventoryError::validation(
            ProductField::Price,
            format!("{value:?} is not a non-negative number"),
        )),
    }
}

fn parse_quantity(value: &str) -> Result<u32> {
    parse_whole(value)
        .and_then(|q| u32::try_from(q).ok())
        .ok_or_else(|| {
            InventoryError::validation(
                ProductField::Quantity,
                format!("{value:?} is not a non-negative whole number"),
            )
        })
}
