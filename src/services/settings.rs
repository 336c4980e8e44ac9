//! Settings service
//!
//! Currency selection for the settings screen.

use crate::error::PocketResult;
use crate::models::Currency;
use crate::observable::Observable;
use crate::storage::PreferenceStore;

/// State holder for the settings screen
pub struct SettingsService<'a> {
    store: &'a PreferenceStore,
    selected_currency: Observable<Currency>,
}

impl<'a> SettingsService<'a> {
    pub fn new(store: &'a PreferenceStore) -> PocketResult<Self> {
        let selected_currency = Observable::new(store.get_selected_currency()?);
        Ok(Self {
            store,
            selected_currency,
        })
    }

    pub fn selected_currency(&self) -> &Observable<Currency> {
        &self.selected_currency
    }

    /// Currencies offered by the picker
    pub fn supported_currencies(&self) -> &'static [Currency] {
        &Currency::ALL
    }

    /// Persist the chosen currency and republish it
    pub fn set_selected_currency(&self, currency: Currency) -> PocketResult<()> {
        self.store.set_selected_currency(currency)?;
        self.selected_currency.set(currency);
        Ok(())
    }

    /// Re-read the currency from the store, e.g. after a restore
    pub fn refresh(&self) -> PocketResult<()> {
        self.selected_currency.set(self.store.get_selected_currency()?);
        Ok(())
    }
}
