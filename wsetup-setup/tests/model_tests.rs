mod common;

use common::{
    RecordingHost, RefusingRepository, init_tracing, make_definition, make_model, record_events,
    tags,
};
use pretty_assertions::assert_eq;
use wsetup_model::{IpaStatus, Lifecycle, SpecialSelection};
use wsetup_setup::{
    Approval, DataDecision, DeleteOutcome, SetupError, SetupEvent, SetupSection,
    WritingSystemSetupModel,
};
use wsetup_store::{JsonDefinitionMapper, MemoryRepository, WritingSystemRepository};

use SetupEvent::{CurrentItemUpdated, ItemAddedOrDeleted, SelectionChanged};

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_loads_repository_without_selection() {
    init_tracing();
    let (model, _) = make_model(&["en", "fr"]);
    assert_eq!(tags(&model), vec!["en", "fr"]);
    assert_eq!(model.current_index(), None);
    assert!(model.uses_repository());
}

#[test]
fn single_starts_selected() {
    let model = WritingSystemSetupModel::single(make_definition("de"));
    assert_eq!(model.current_index(), Some(0));
    assert!(!model.uses_repository());
    assert!(model.repository().is_none());
}

#[test]
fn single_refuses_collection_operations() {
    let mut model = WritingSystemSetupModel::single(make_definition("de"));
    assert!(matches!(model.add_new(), Err(SetupError::InvalidOperation(_))));
    assert!(matches!(model.duplicate_current(), Err(SetupError::InvalidOperation(_))));
    assert!(matches!(model.delete_current(), Err(SetupError::InvalidOperation(_))));
    assert!(matches!(model.save(), Err(SetupError::InvalidOperation(_))));
    assert_eq!(tags(&model), vec!["de"]);
}

#[test]
fn single_still_edits() {
    let mut model = WritingSystemSetupModel::single(make_definition("de"));
    assert!(model.set_current_region("AT").unwrap());
    assert_eq!(tags(&model), vec!["de-AT"]);
}

// ── Selection ────────────────────────────────────────────────────

#[test]
fn out_of_range_index_is_rejected() {
    let (mut model, _) = make_model(&["en"]);
    let err = model.set_current_index(Some(3)).unwrap_err();
    assert!(matches!(err, SetupError::ArgumentOutOfRange { index: 3, len: 1 }));
    assert_eq!(model.current_index(), None);
}

#[test]
fn selecting_same_index_is_silent() {
    let (mut model, _) = make_model(&["en", "fr"]);
    let events = record_events(&mut model);
    model.set_current_index(Some(1)).unwrap();
    model.set_current_index(Some(1)).unwrap();
    assert_eq!(*events.borrow(), vec![SelectionChanged]);
}

#[test]
fn select_by_tag_and_id() {
    let (mut model, _) = make_model(&["en", "fr"]);
    assert!(model.set_current_from_language_tag("FR"));
    assert_eq!(model.current_index(), Some(1));
    assert!(!model.set_current_from_language_tag("de"));
    assert_eq!(model.current_index(), Some(1));

    let en = model.definitions()[0].id();
    assert!(model.set_current_definition(en));
    assert_eq!(model.current_index(), Some(0));

    model.clear_selection();
    assert_eq!(model.current_definition(), None);
}

#[test]
fn unsubscribe_stops_events() {
    let (mut model, _) = make_model(&["en", "fr"]);
    let events = std::rc::Rc::new(std::cell::RefCell::new(0));
    let sink = std::rc::Rc::clone(&events);
    let id = model.subscribe(move |_, _| *sink.borrow_mut() += 1);
    model.set_current_index(Some(0)).unwrap();
    assert!(model.unsubscribe(id));
    assert!(!model.unsubscribe(id));
    model.set_current_index(Some(1)).unwrap();
    assert_eq!(*events.borrow(), 1);
}

// ── Add ──────────────────────────────────────────────────────────

#[test]
fn add_new_appends_selects_and_orders_events() {
    let (mut model, _) = make_model(&["en"]);
    let events = record_events(&mut model);
    let id = model.add_new().unwrap();

    assert_eq!(tags(&model), vec!["en", "qaa"]);
    assert_eq!(model.current_index(), Some(1));
    assert_eq!(model.current_definition().unwrap().id(), id);
    assert_eq!(model.current_definition().unwrap().abbreviation, "New");
    assert_eq!(*events.borrow(), vec![ItemAddedOrDeleted, SelectionChanged]);
}

#[test]
fn add_new_twice_makes_tags_unique() {
    let (mut model, _) = make_model(&[]);
    model.add_new().unwrap();
    model.add_new().unwrap();
    assert_eq!(tags(&model), vec!["qaa", "qaa-x-dupl0"]);
}

#[test]
fn add_new_uses_configured_abbreviation() {
    let (model, _) = make_model(&[]);
    let mut model = model.with_config(SetupSection {
        new_definition_abbreviation: "Neu".into(),
        ..SetupSection::default()
    });
    model.add_new().unwrap();
    assert_eq!(model.current_definition().unwrap().abbreviation, "Neu");
}

#[test]
fn cancelled_bootstrap_only_notifies() {
    let (mut model, _) = make_model(&["en"]);
    let events = record_events(&mut model);
    let added = model.add_new_with(|| None).unwrap();
    assert_eq!(added, None);
    assert_eq!(tags(&model), vec!["en"]);
    assert_eq!(*events.borrow(), vec![ItemAddedOrDeleted]);
}

#[test]
fn bootstrap_tag_is_made_unique_against_repository() {
    let (mut model, _) = make_model(&["en"]);
    model.add_new_with(|| Some(make_definition("en"))).unwrap();
    assert_eq!(tags(&model), vec!["en", "en-x-dupl0"]);
}

#[test]
fn unlisted_abbreviation_is_replaced() {
    let (mut model, _) = make_model(&[]);
    let mut bootstrap = make_definition("qaa");
    bootstrap.abbreviation = "qaa".into();
    model.add_new_with(|| Some(bootstrap)).unwrap();
    assert_eq!(model.current_definition().unwrap().abbreviation, "v");
}

#[test]
fn add_predefined_selects_it() {
    let (mut model, _) = make_model(&["en"]);
    let id = model.add_predefined(make_definition("fr")).unwrap();
    assert_eq!(model.current_definition().unwrap().id(), id);
}

// ── Duplicate ────────────────────────────────────────────────────

#[test]
fn duplicate_inserts_after_original() {
    let (mut model, _) = make_model(&["en", "fr"]);
    model.set_current_index(Some(0)).unwrap();
    let events = record_events(&mut model);
    let copy = model.duplicate_current().unwrap();

    assert_eq!(tags(&model), vec!["en", "en-x-dupl0", "fr"]);
    assert_eq!(model.current_index(), Some(1));
    assert_eq!(model.current_definition().unwrap().id(), copy);
    assert_ne!(copy, model.definitions()[0].id());
    assert_eq!(*events.borrow(), vec![ItemAddedOrDeleted, SelectionChanged]);
}

#[test]
fn duplicate_of_duplicate_does_not_stack_markers() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    model.duplicate_current().unwrap();
    model.duplicate_current().unwrap();
    assert_eq!(tags(&model), vec!["en", "en-x-dupl0", "en-x-dupl1"]);
}

#[test]
fn duplicate_needs_selection() {
    let (mut model, _) = make_model(&["en"]);
    assert!(matches!(model.duplicate_current(), Err(SetupError::InvalidOperation(_))));
}

// ── Delete ───────────────────────────────────────────────────────

#[test]
fn delete_middle_moves_to_next() {
    let (mut model, repo) = make_model(&["en", "fr", "de"]);
    model.set_current_index(Some(1)).unwrap();
    let events = record_events(&mut model);

    let outcome = model.delete_current().unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted { tag: "fr".into() });
    assert_eq!(tags(&model), vec!["en", "de"]);
    assert_eq!(model.current_index(), Some(1));
    assert_eq!(repo.sorted_tags(), vec!["de", "en"]);
    assert_eq!(*events.borrow(), vec![SelectionChanged, ItemAddedOrDeleted]);

    let deleted = model.deleted_definitions();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].language_tag(), "fr");
    assert_eq!(deleted[0].lifecycle, Lifecycle::Deleted);
}

#[test]
fn delete_last_moves_to_previous() {
    let (mut model, _) = make_model(&["en", "fr"]);
    model.set_current_index(Some(1)).unwrap();
    model.delete_current().unwrap();
    assert_eq!(model.current_index(), Some(0));
}

#[test]
fn delete_only_item_clears_selection() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    model.delete_current().unwrap();
    assert_eq!(model.current_index(), None);
    assert!(model.definitions().is_empty());
}

#[test]
fn delete_unsaved_definition_leaves_repository_alone() {
    let (mut model, repo) = make_model(&["en"]);
    model.add_new().unwrap();
    model.delete_current().unwrap();
    assert_eq!(repo.sorted_tags(), vec!["en"]);
}

#[test]
fn host_can_cancel_deletion() {
    let (model, _) = make_model(&["en"]);
    let mut model = model.with_host(RecordingHost::answering(DataDecision::Nothing));
    model.set_current_index(Some(0)).unwrap();
    let events = record_events(&mut model);

    assert_eq!(model.delete_current().unwrap(), DeleteOutcome::Cancelled);
    assert_eq!(tags(&model), vec!["en"]);
    assert!(events.borrow().is_empty());
}

#[test]
fn denied_delete_is_reported_and_restored() {
    let host = RecordingHost::default();
    host.0.borrow_mut().delete = Approval::Denied {
        reason: "It is in use.".into(),
    };
    let (model, repo) = make_model(&["en"]);
    let mut model = model.with_host(host.clone());
    model.set_current_index(Some(0)).unwrap();

    let outcome = model.delete_current().unwrap();

    let message = "Can not delete the input system en. It is in use.".to_string();
    assert_eq!(outcome, DeleteOutcome::Declined { message: message.clone() });
    assert_eq!(host.problems(), vec![message]);
    assert_eq!(model.definitions()[0].lifecycle, Lifecycle::Active);
    assert_eq!(repo.sorted_tags(), vec!["en"]);
}

#[test]
fn conflate_merges_in_repository() {
    let (model, repo) = make_model(&["en", "fr"]);
    let mut model = model.with_host(RecordingHost::answering(DataDecision::Conflate {
        with: "en".into(),
    }));
    model.set_current_index(Some(1)).unwrap();

    let outcome = model.delete_current().unwrap();

    assert_eq!(
        outcome,
        DeleteOutcome::Conflated {
            source: "fr".into(),
            target: "en".into()
        }
    );
    let conflations = repo.0.borrow().conflations().to_vec();
    assert_eq!(conflations.len(), 1);
    assert_eq!(conflations[0].source_tag, "fr");
    assert_eq!(repo.sorted_tags(), vec!["en"]);
}

#[test]
fn conflate_uses_stored_tag_after_edit() {
    let (model, repo) = make_model(&["en", "fr"]);
    let mut model = model.with_host(RecordingHost::answering(DataDecision::Conflate {
        with: "en".into(),
    }));
    model.set_current_index(Some(1)).unwrap();
    model.set_current_region("CA").unwrap();

    model.delete_current().unwrap();

    assert_eq!(repo.0.borrow().conflations()[0].source_tag, "fr");
}

#[test]
fn denied_conflate_is_reported() {
    let host = RecordingHost::answering(DataDecision::Conflate { with: "en".into() });
    host.0.borrow_mut().conflate = Approval::Denied {
        reason: "No.".into(),
    };
    let (model, _) = make_model(&["en", "fr"]);
    let mut model = model.with_host(host.clone());
    model.set_current_index(Some(1)).unwrap();

    model.delete_current().unwrap();

    assert_eq!(
        host.problems(),
        vec!["Can not conflate the input system fr to en. No.".to_string()]
    );
    assert_eq!(tags(&model), vec!["en", "fr"]);
}

// ── Save ─────────────────────────────────────────────────────────

#[test]
fn save_stores_new_and_edited_definitions() {
    let (mut model, repo) = make_model(&["en"]);
    model.add_new().unwrap();
    model.set_current_language_code("de").unwrap();
    model.save().unwrap();
    assert_eq!(repo.sorted_tags(), vec!["de", "en"]);
    assert_eq!(repo.0.borrow().save_count(), 1);
}

#[test]
fn save_resolves_a_tag_swap_without_deleting() {
    let (mut model, repo) = make_model(&["en", "fr"]);
    let ids: Vec<_> = model.definitions().iter().map(|d| d.id()).collect();
    model.set_current_index(Some(0)).unwrap();
    model.set_current_language_code("fr").unwrap();
    model.set_current_index(Some(1)).unwrap();
    model.set_current_language_code("en").unwrap();
    let events = record_events(&mut model);

    model.save().unwrap();

    assert_eq!(tags(&model), vec!["fr-x-dupl0", "en"]);
    assert_eq!(repo.sorted_tags(), vec!["en", "fr-x-dupl0"]);
    for id in ids {
        assert!(repo.contains_id(id));
    }
    assert_eq!(*events.borrow(), vec![ItemAddedOrDeleted]);
}

#[test]
fn save_removes_what_the_store_refuses_twice() {
    let host = RecordingHost::default();
    let mut repo = RefusingRepository::refusing("zz");
    let stored = make_definition("zu");
    repo.inner.set(&stored).unwrap();
    let mut model = WritingSystemSetupModel::new(repo).with_host(host.clone());
    model.set_current_index(Some(0)).unwrap();
    model.set_current_language_code("zz").unwrap();

    model.save().unwrap();

    let repository = model.repository().unwrap();
    assert!(!repository.contains_id(stored.id()));
    assert_eq!(host.problems().len(), 1);
    assert!(host.problems()[0].contains("zz"));
}

// ── Import / export ──────────────────────────────────────────────

#[test]
fn import_missing_file_names_path() {
    let (mut model, _) = make_model(&[]);
    let err = model.import_file("/no/such/file.json").unwrap_err();
    match err {
        SetupError::InvalidArgument(message) => {
            assert_eq!(message, "File does not exist: /no/such/file.json");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn export_then_import_adds_unique_copy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fr.json");
    let (mut model, _) = make_model(&["fr"]);
    model.set_current_index(Some(0)).unwrap();
    model.set_current_language_name("French").unwrap();
    model.export_current_as_file(&path).unwrap();

    let events = record_events(&mut model);
    let id = model.import_file(&path).unwrap();

    assert_eq!(tags(&model), vec!["fr", "fr-x-dupl0"]);
    let imported = model.current_definition().unwrap();
    assert_eq!(imported.id(), id);
    assert_ne!(imported.id(), model.definitions()[0].id());
    assert_eq!(imported.language_name, "French");
    assert_eq!(*events.borrow(), vec![ItemAddedOrDeleted, SelectionChanged]);
}

#[test]
fn export_needs_selection() {
    let dir = tempfile::tempdir().unwrap();
    let (model, _) = make_model(&["fr"]);
    let model = model.with_mapper(JsonDefinitionMapper);
    let err = model.export_current_as_file(dir.path().join("x.json")).unwrap_err();
    assert!(matches!(err, SetupError::InvalidOperation(_)));
}

// ── Setters ──────────────────────────────────────────────────────

#[test]
fn setter_emits_only_on_change() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    let events = record_events(&mut model);

    assert!(model.set_current_abbreviation("Eng").unwrap());
    assert!(!model.set_current_abbreviation("Eng").unwrap());
    assert!(model.set_current_font_size(12.0).unwrap());
    assert!(model.set_current_right_to_left(true).unwrap());

    assert_eq!(*events.borrow(), vec![CurrentItemUpdated; 3]);
    let current = model.current_definition().unwrap();
    assert_eq!(current.abbreviation, "Eng");
    assert!(current.right_to_left);
}

#[test]
fn descriptive_setters() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    model.set_current_font_name("Charis SIL").unwrap();
    model.set_current_keyboard("US").unwrap();
    model.set_current_spell_checking_id("en_US").unwrap();
    model.set_current_version_number("2").unwrap();
    model.set_current_version_description("Second draft").unwrap();

    let current = model.current_definition().unwrap();
    assert_eq!(current.default_font_name, "Charis SIL");
    assert_eq!(current.keyboard, "US");
    assert_eq!(current.spell_checking_id, "en_US");
    assert_eq!(current.version_number, "2");
    assert_eq!(current.version_description, "Second draft");
}

#[test]
fn invalid_script_is_rejected_unchanged() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    assert!(matches!(model.set_current_script("L4tn"), Err(SetupError::Tag(_))));
    assert_eq!(tags(&model), vec!["en"]);
}

#[test]
fn variant_moves_unregistered_tokens_to_private_use() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    model.set_current_variant("fonipa-special").unwrap();
    assert_eq!(tags(&model), vec!["en-fonipa-x-special"]);
}

#[test]
fn invalid_variant_is_reported_and_rejected() {
    let host = RecordingHost::default();
    let (model, _) = make_model(&["en-fonipa"]);
    let mut model = model.with_host(host.clone());
    model.set_current_index(Some(0)).unwrap();

    let err = model.set_current_variant("x-waytoolongtoken").unwrap_err();

    assert!(matches!(err, SetupError::Validation(_)));
    assert_eq!(host.problems().len(), 1);
    assert_eq!(tags(&model), vec!["en-fonipa"]);
}

#[test]
fn ipa_and_voice_exclude_each_other() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    model.set_current_ipa_status(IpaStatus::Phonetic).unwrap();
    assert_eq!(tags(&model), vec!["en-fonipa-x-etic"]);

    model.identifier_voice_selected().unwrap();
    assert_eq!(tags(&model), vec!["en-Zxxx-x-audio"]);

    model.identifier_ipa_selected().unwrap();
    assert_eq!(tags(&model), vec!["en-fonipa"]);
    assert_eq!(model.special_selection(), SpecialSelection::Ipa);
}

#[test]
fn unchanged_ipa_status_is_not_an_update() {
    let (mut model, _) = make_model(&["zh-pinyin-fonipa"]);
    model.set_current_index(Some(0)).unwrap();
    let events = record_events(&mut model);

    assert!(!model.set_current_ipa_status(IpaStatus::Ipa).unwrap());
    assert_eq!(tags(&model), vec!["zh-pinyin-fonipa"]);
    assert!(events.borrow().is_empty());
}

#[test]
fn nothing_selected_clears_identifiers() {
    let (mut model, _) = make_model(&["en-Latn-US-fonipa"]);
    model.set_current_index(Some(0)).unwrap();
    model.identifier_nothing_selected().unwrap();
    assert_eq!(tags(&model), vec!["en"]);
}

#[test]
fn nothing_selected_keeps_custom_markers() {
    let (mut model, _) = make_model(&["qaa-Qaaa-QM-x-kal-scr-reg"]);
    model.set_current_index(Some(0)).unwrap();
    assert!(!model.identifier_nothing_selected().unwrap());
    assert_eq!(tags(&model), vec!["qaa-Qaaa-QM-x-kal-scr-reg"]);
}

#[test]
fn unlisted_language_name_becomes_private_use() {
    let (mut model, _) = make_model(&[]);
    model.add_new().unwrap();
    model.set_current_variant_from_unlisted_language_name("Kalaba").unwrap();
    assert_eq!(tags(&model), vec!["qaa-x-Kalaba"]);

    model.set_current_variant_from_unlisted_language_name("Ngala").unwrap();
    assert_eq!(tags(&model), vec!["qaa-x-Ngala"]);
    assert_eq!(model.special_selection(), SpecialSelection::UnlistedLanguageDetails);
}

#[test]
fn rename_language_drops_unlisted_name_token() {
    let (mut model, _) = make_model(&["qaa-fonipa-x-kalaba-etic"]);
    model.set_current_index(Some(0)).unwrap();
    let events = record_events(&mut model);

    assert!(model.rename_current_language("de", "German").unwrap());

    assert_eq!(tags(&model), vec!["de-fonipa-x-etic"]);
    assert_eq!(model.current_definition().unwrap().language_name, "German");
    assert_eq!(*events.borrow(), vec![SelectionChanged, CurrentItemUpdated]);
}

// ── List support ─────────────────────────────────────────────────

#[test]
fn labels_and_save_flags() {
    let (mut model, _) = make_model(&["en", "fr"]);
    model.set_current_index(Some(0)).unwrap();
    model.set_current_language_name("English").unwrap();
    model.set_current_index(Some(1)).unwrap();
    model.set_current_language_code("en").unwrap();

    assert_eq!(model.list_labels(), vec!["English", "FR"]);
    assert_eq!(model.can_save_flags(), vec![false, false]);
    assert!(!model.can_save_current());

    model.set_current_region("GB").unwrap();
    assert_eq!(model.can_save_flags(), vec![true, true]);
    assert!(model.can_save_current());
}

#[test]
fn verbose_description_mentions_parts() {
    let (mut model, _) = make_model(&["caa-Latn-GT"]);
    model.set_current_index(Some(0)).unwrap();
    model.set_current_language_name("Chorti").unwrap();
    assert_eq!(
        model.current_verbose_description(),
        "Chorti in GT written in Latn script. (caa-Latn-GT)"
    );
}

#[test]
fn locked_special_selection_wins() {
    let (mut model, _) = make_model(&["en"]);
    model.set_current_index(Some(0)).unwrap();
    assert_eq!(model.special_selection(), SpecialSelection::None);
    model.lock_special_selection(Some(SpecialSelection::Voice));
    assert_eq!(model.special_selection(), SpecialSelection::Voice);
    model.lock_special_selection(None);
    assert_eq!(model.special_selection(), SpecialSelection::None);
}

#[test]
fn plain_memory_repository_works_too() {
    let repo = MemoryRepository::with_definitions(vec![make_definition("en")]).unwrap();
    let mut model = WritingSystemSetupModel::new(repo);
    model.add_new().unwrap();
    model.save().unwrap();
    assert_eq!(model.repository().unwrap().all_tags().len(), 2);
}
