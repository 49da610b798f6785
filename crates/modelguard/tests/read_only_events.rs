use modelguard::{
    EventId, GuardConfig, LifecycleEvent, Model, ModelType, Propagation, Repository,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

struct Invoice;

impl ModelType for Invoice {
    fn type_name() -> &'static str {
        "billing::Invoice"
    }

    fn read_only_events() -> Vec<LifecycleEvent> {
        vec![LifecycleEvent::Deleting]
    }
}

#[test]
fn test_deleting_suppressed_but_saves_proceed() {
    let mut repo = Repository::new();
    let mut invoice = Model::<Invoice>::new();
    invoice.set_attribute("total", 120);
    assert!(repo.save(&mut invoice).unwrap());

    invoice.set_attribute("total", 150);
    assert!(repo.save(&mut invoice).unwrap());

    assert!(!repo.delete(&mut invoice).unwrap());
    assert_eq!(repo.count::<Invoice>(), 1);

    let stored = repo.find::<Invoice>(invoice.key().unwrap()).unwrap();
    assert_eq!(stored.get_attribute("total"), Some(&json!(150)));
}

#[test]
fn test_suppression_uses_scoped_identifier() {
    let mut repo = Repository::new();
    repo.boot::<Invoice>();

    let id = EventId::new(LifecycleEvent::Deleting, "billing::Invoice");
    assert_eq!(id.to_string(), "model.deleting: billing::Invoice");
    assert_eq!(repo.dispatcher().dispatch(&id), Propagation::Halt);
    assert_eq!(repo.dispatcher().total_listeners(), 1);
}

#[test]
fn test_other_types_unaffected() {
    struct Payment;
    impl ModelType for Payment {}

    let mut repo = Repository::new();
    repo.boot::<Invoice>();

    let mut payment = Model::<Payment>::new();
    repo.save(&mut payment).unwrap();
    assert!(repo.delete(&mut payment).unwrap());
    assert_eq!(repo.count::<Payment>(), 0);
}

struct Ledger;

impl ModelType for Ledger {
    fn type_name() -> &'static str {
        "Ledger"
    }

    fn guard_config() -> GuardConfig {
        GuardConfig::from_toml_str(
            r#"
            read_only_events = ["updating", "deleting"]
            read_only_attributes = ["entry_number"]
            "#,
        )
        .unwrap_or_default()
    }
}

#[test]
fn test_type_configured_from_toml() {
    let mut repo = Repository::new();
    let mut ledger = Model::<Ledger>::new();
    ledger.set_attribute("amount", 10);
    assert!(ledger.set_attribute("EntryNumber", 7).is_rejected());
    assert!(repo.save(&mut ledger).unwrap());

    ledger.set_attribute("amount", 20);
    assert!(!repo.save(&mut ledger).unwrap());
    assert!(!repo.delete(&mut ledger).unwrap());

    let stored = repo.find::<Ledger>(ledger.key().unwrap()).unwrap();
    assert_eq!(stored.get_attribute("amount"), Some(&json!(10)));
}

#[test]
fn test_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guard.toml");
    fs::write(
        &path,
        "read_only_events = [\"saving\"]\nprevent_new_assignments = true\nfillable = [\"title\"]\n",
    )
    .unwrap();

    let config = GuardConfig::load(&path).unwrap();
    assert_eq!(config.read_only_events, vec![LifecycleEvent::Saving]);
    assert!(config.prevent_new_assignments);
    assert!(config.is_guarded());
}
