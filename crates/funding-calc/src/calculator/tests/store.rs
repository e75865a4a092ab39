use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::calculator::domain::{FormAnswers, FormPatch};
use crate::calculator::options::Region;
use crate::calculator::persistence::{
    FileSlot, MemorySlot, PersistenceError, PersistencePort, FORM_STATE_KEY,
};
use crate::calculator::store::FormStateStore;

#[test]
fn fresh_store_starts_from_defaults() {
    let store = FormStateStore::open(Arc::new(MemorySlot::default()));
    assert_eq!(store.answers(), &FormAnswers::default());
}

#[test]
fn update_persists_full_record() {
    let slot = Arc::new(MemorySlot::default());
    let mut store = FormStateStore::open(slot.clone());

    store.update(profile_patch());

    let raw = stored(&slot).expect("answers persisted");
    let persisted: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(persisted["location"], "monteregie");
    assert_eq!(persisted["budgetItems"].as_array().map(Vec::len), Some(3));
    assert_eq!(persisted["supportType"], "any");
}

#[test]
fn reopened_store_restores_answers() {
    let slot = Arc::new(MemorySlot::default());
    {
        let mut store = FormStateStore::open(slot.clone());
        store.update(profile_patch());
        store.update(budget_patch());
    }

    let store = FormStateStore::open(slot);

    assert_eq!(store.answers().location, Some(Region::Monteregie));
    assert_eq!(store.answers().total_budget(), 100_000.0);
}

#[test]
fn reset_clears_storage_and_restores_defaults() {
    let slot = Arc::new(MemorySlot::default());
    let mut store = FormStateStore::open(slot.clone());
    store.update(profile_patch());

    store.reset();
    let reloaded = store.load().clone();

    assert_eq!(stored(&slot), None);
    assert_eq!(reloaded, FormAnswers::default());
    let names: Vec<_> = reloaded
        .budget_items
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(
        names,
        ["Software Licenses (ERP/CRM)", "Implementation Consultants", "Training"]
    );
}

#[test]
fn unreadable_state_falls_back_to_defaults() {
    let slot = Arc::new(MemorySlot::with_value("{not json"));
    let store = FormStateStore::open(slot);
    assert_eq!(store.answers(), &FormAnswers::default());
}

#[test]
fn malformed_fields_are_discarded_individually() {
    let raw = json!({
        "location": "laval",
        "projectTypes": "erp",
        "industry": "shipbuilding",
        "companyName": "Laval Bois",
    })
    .to_string();
    let store = FormStateStore::open(Arc::new(MemorySlot::with_value(raw)));

    let answers = store.answers();
    assert_eq!(answers.location, Some(Region::Laval));
    assert!(answers.project_types.is_empty());
    assert_eq!(answers.industry, None);
    assert_eq!(answers.company_name, "Laval Bois");
}

struct ReadOnlySlot;

impl PersistencePort for ReadOnlySlot {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn save(&self, _raw: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable)
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable)
    }
}

#[test]
fn failed_save_still_advances_in_memory_state() {
    let mut store = FormStateStore::open(Arc::new(ReadOnlySlot));

    store.update(FormPatch {
        email: Some("info@exemple.ca".to_string()),
        ..FormPatch::default()
    });
    assert_eq!(store.answers().email, "info@exemple.ca");

    store.reset();
    assert_eq!(store.answers(), &FormAnswers::default());
}

#[test]
fn file_slot_survives_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut store = FormStateStore::open(Arc::new(FileSlot::new(dir.path(), FORM_STATE_KEY)));
        store.update(project_patch());
    }

    let store = FormStateStore::open(Arc::new(FileSlot::new(dir.path(), FORM_STATE_KEY)));

    assert_eq!(store.answers().project_types.len(), 2);
}
