use lifeos_core::{
    DashboardStore, EventBus, FileStorage, GridSpan, NewComponent, STORAGE_KEY, Snapshot,
};
use serde_json::json;

fn store_in(dir: &std::path::Path) -> DashboardStore {
    let storage = FileStorage::new(dir.to_path_buf());
    DashboardStore::load(Box::new(storage), EventBus::new())
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (section_id, component_id) = {
        let mut store = store_in(dir.path());
        let section_id = store.add_section("Finance", "Wallet").unwrap();
        let component_id = store
            .add_component(
                &section_id,
                NewComponent::new("investments-hero", "Net Worth")
                    .with_size(GridSpan::Two, GridSpan::One),
            )
            .unwrap();
        store
            .update_component_config(&section_id, &component_id, &json!({"totalNetWorth": 42.0}))
            .unwrap();
        store.set_active_section(Some(section_id.clone()));
        (section_id, component_id)
    };

    let store = store_in(dir.path());
    let section = store.section(&section_id).expect("section survived");
    assert_eq!(section.title, "Finance");
    let component = section.component(&component_id).expect("component survived");
    assert_eq!(component.kind, "investments-hero");
    assert_eq!(component.w, GridSpan::Two);
    assert_eq!(component.config["totalNetWorth"], json!(42.0));
    assert_eq!(store.snapshot().active_section_id.as_deref(), Some(section_id.as_str()));
}

#[test]
fn corrupt_document_yields_the_default_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{STORAGE_KEY}.json")), "not json").unwrap();

    let store = store_in(dir.path());
    assert_eq!(*store.snapshot(), Snapshot::default());
}

#[test]
fn empty_directory_yields_the_default_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    assert_eq!(store.sections().len(), 1);
    assert_eq!(store.sections()[0].id, "home");
}
