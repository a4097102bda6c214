use fssim::{ChildEntry, OpError, Simulator};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Create {
    Dir(String),
    File(String),
}

fn create_op() -> impl Strategy<Value = Create> {
    let name = "[a-d]{1,2}";
    prop_oneof![
        name.prop_map(Create::Dir),
        name.prop_map(Create::File),
    ]
}

proptest! {
    #[test]
    fn siblings_never_share_a_name(ops in prop::collection::vec(create_op(), 1..40)) {
        let mut sim = Simulator::ephemeral();
        let mut seen = HashSet::new();
        for op in &ops {
            let before = sim.list_children().len();
            let (name, result) = match op {
                Create::Dir(name) => (name, sim.make_directory(name)),
                Create::File(name) => (name, sim.make_file(name, "")),
            };
            if seen.insert(name.clone()) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(OpError::NameCollision(name.clone())));
                prop_assert_eq!(sim.list_children().len(), before);
            }
        }

        let listing = sim.list_children();
        let unique: HashSet<&str> = listing.iter().map(|c| c.name.as_str()).collect();
        prop_assert_eq!(unique.len(), listing.len());
        prop_assert_eq!(listing.len(), seen.len());
    }

    #[test]
    fn rename_there_and_back_restores_the_tree(
        names in prop::collection::hash_set("[a-z]{1,6}", 1..8),
        pick in any::<prop::sample::Index>(),
        fresh in "[A-Z]{1,6}",
    ) {
        let mut sim = Simulator::ephemeral();
        let names: Vec<String> = names.into_iter().collect();
        for (i, name) in names.iter().enumerate() {
            if i % 2 == 0 {
                sim.make_directory(name).unwrap();
            } else {
                sim.make_file(name, name).unwrap();
            }
        }
        let target = pick.get(&names).clone();
        let before: Vec<ChildEntry> = sim.list_children();
        let walk_before = sim.walk();
        let id_before = sim.tree().find_child(sim.tree().root(), &target);

        sim.rename(&target, &fresh).unwrap();
        sim.rename(&fresh, &target).unwrap();

        prop_assert_eq!(sim.list_children(), before);
        prop_assert_eq!(sim.walk(), walk_before);
        prop_assert_eq!(sim.tree().find_child(sim.tree().root(), &target), id_before);
    }
}
