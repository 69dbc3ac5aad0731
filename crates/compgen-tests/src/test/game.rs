use crate::game::{
    empty::Empty,
    heal_request::HealRequest,
    heal_response::HealResponse,
    level_up::LevelUp,
    loadout::Loadout,
    player::{CommandBinding, Commands, Player, PlayerUpdate},
    self_type::SelfType,
    team::Team,
    tree::{Tree, kind::Kind},
};
use compgen_runtime::{
    eq::hash_one,
    memory::{MemoryObject, MemoryUpdate},
    prelude::*,
};
use proptest::prelude::*;

///
/// Recorder
/// keeps every command the generated senders hand over
///

#[derive(Default)]
struct Recorder {
    requests: Vec<(EntityId, ComponentId, CommandIndex, MemoryObject)>,
    responses: Vec<(RequestId, ComponentId, CommandIndex, MemoryObject)>,
    next_id: u64,
}

impl CommandTransport for Recorder {
    type Object = MemoryObject;

    fn send_command_request(
        &mut self,
        entity_id: EntityId,
        component_id: ComponentId,
        command_index: CommandIndex,
        request: MemoryObject,
    ) -> RequestId {
        self.next_id += 1;
        self.requests
            .push((entity_id, component_id, command_index, request));

        RequestId(self.next_id)
    }

    fn send_command_response(
        &mut self,
        request_id: RequestId,
        component_id: ComponentId,
        command_index: CommandIndex,
        response: MemoryObject,
    ) {
        self.responses
            .push((request_id, component_id, command_index, response));
    }
}

fn loadout() -> Loadout {
    Loadout {
        ammo: [("arrow".to_string(), 12), ("bolt".to_string(), 3)]
            .into_iter()
            .collect(),
        perks: List::from(vec!["stealth".to_string()]),
        nickname: Some("ace".to_string()),
        badge: None,
        team: Some(Team::Blue),
        r#type: 2,
        target: EntityId(17),
    }
}

fn player() -> Player {
    Player::new("ana".to_string(), 10, loadout(), Some(1.5))
}

prop_compose! {
    fn arb_loadout()(
        ammo in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..4),
        perks in prop::collection::vec("[a-z]{0,5}", 0..4),
        nickname in prop::option::of("[a-z ]{0,6}"),
        badge in prop::option::of(prop::collection::vec(any::<u8>(), 0..6)),
        team in prop::option::of(prop_oneof![Just(Team::Red), Just(Team::Blue)]),
        kind in any::<u32>(),
        target in any::<i64>(),
    ) -> Loadout {
        Loadout {
            ammo: ammo.into_iter().collect(),
            perks: List::from(perks),
            nickname,
            badge,
            team,
            r#type: kind,
            target: EntityId(target),
        }
    }
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(loadout in arb_loadout()) {
        let obj: MemoryObject = loadout.to_schema();
        let decoded = Loadout::from_schema(&obj).expect("decode");

        prop_assert_eq!(&decoded, &loadout);
        prop_assert_eq!(hash_one(&decoded), hash_one(&loadout));
    }
}

#[test]
fn merge_replaces_written_and_cleared_fields() {
    let base = player();

    let mut builder = PlayerUpdate::new();
    builder.set_health(42).set_speed(None);
    let update: MemoryUpdate = builder.to_update();

    assert_eq!(update.cleared_fields(), &[Player::SPEED_FIELD_ID]);

    let merged = base.apply_update(&update).expect("merge");
    assert_eq!(merged.health, 42);
    assert_eq!(merged.speed, None);
    assert_eq!(merged.name, "ana");
    assert_eq!(merged.loadout, loadout());

    // the receiver is left untouched
    assert_eq!(base, player());
}

#[test]
fn empty_update_leaves_the_component_unchanged() {
    let builder = PlayerUpdate::new();
    assert!(builder.is_empty());

    let update: MemoryUpdate = builder.to_update();
    assert_eq!(player().apply_update(&update).expect("merge"), player());
}

#[test]
fn updaters_write_single_fields() {
    let mut update = MemoryUpdate::new();
    Player::update_name(&mut update, "bo");
    Player::update_loadout(&mut update, &Loadout::default());

    let merged = player().apply_update(&update).expect("merge");
    assert_eq!(merged.name, "bo");
    assert_eq!(merged.loadout, Loadout::default());
    assert_eq!(merged.health, 10);
}

#[test]
fn events_keep_update_order() {
    let mut builder = PlayerUpdate::new();
    for level in [3, 1, 2] {
        builder.add_levelled_up(LevelUp::new(level));
    }
    let update: MemoryUpdate = builder.to_update();

    let levels: Vec<u32> = Player::levelled_up_events(&update)
        .expect("events")
        .iter()
        .map(|e| e.level)
        .collect();
    assert_eq!(levels, vec![3, 1, 2]);
}

#[test]
fn command_kind_checks_the_component_id() {
    assert_eq!(Player::command_kind(1000, 1), Some(Commands::Heal));
    assert_eq!(Player::command_kind(54, 1), None);
    assert_eq!(Player::command_kind(1000, 9), None);
    assert_eq!(Commands::Heal.index(), 1);
    assert_eq!(Commands::ALL, &[Commands::Heal]);
}

#[test]
fn command_senders_encode_their_payload() {
    let mut transport = Recorder::default();

    let first = Player::send_heal_request(&mut transport, EntityId(7), &HealRequest::new(5));
    let second = CommandBinding::new(&mut transport, EntityId(9)).heal(&HealRequest::new(-2));
    assert_eq!((first, second), (RequestId(1), RequestId(2)));

    let (entity, component, index, request) = &transport.requests[1];
    assert_eq!((*entity, *component, *index), (EntityId(9), 1000, 1));
    assert_eq!(
        HealRequest::from_schema(request).expect("request"),
        HealRequest::new(-2)
    );

    Player::send_heal_response(&mut transport, first, &HealResponse::new(80));
    let (request_id, _, _, response) = &transport.responses[0];
    assert_eq!(*request_id, RequestId(1));
    assert_eq!(
        HealResponse::from_payload(Some(response)).expect("response"),
        HealResponse::new(80)
    );
}

#[test]
fn unknown_enum_value_is_fatal() {
    let mut obj = MemoryObject::new();
    obj.add_enum(Tree::KIND_FIELD_ID, 7);

    let err = Tree::from_schema(&obj).expect_err("7 is undeclared");
    assert_eq!(err.path(), Some("kind"));
    assert!(matches!(
        err.leaf(),
        DecodeError::UnknownEnumValue { value: 7, .. }
    ));
}

#[test]
fn enums_default_to_zero_or_first_value() {
    assert_eq!(Kind::default(), Kind::Oak);
    assert_eq!(Team::default(), Team::Red);
    assert_eq!(u32::from(Team::Blue), 2);
    assert!(Team::try_from(0).is_err());
}

#[test]
fn zero_field_types_are_always_equal() {
    let decoded = Empty::from_schema(&MemoryObject::new()).expect("decode");

    assert_eq!(decoded, Empty::default());
    assert_eq!(hash_one(&decoded), hash_one(&Empty::default()));
    assert!(Empty::default().to_schema::<MemoryObject>().is_empty());
}

#[test]
fn strict_policy_drops_recursive_lists() {
    // `children` reaches back to `SelfType`, so only `label` is generated
    let value = SelfType {
        label: "root".to_string(),
    };
    let obj: MemoryObject = value.to_schema();

    assert_eq!(obj.field_ids(), vec![SelfType::LABEL_FIELD_ID]);
}
