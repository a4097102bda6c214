use fssim::{NodeKind, OpError, Simulator};

#[test]
fn directory_copy_is_unsupported() {
    let mut sim = Simulator::ephemeral();
    sim.make_directory("docs").unwrap();
    assert!(sim.change_directory("docs"));
    sim.make_file("a.txt", "hi").unwrap();
    assert!(sim.change_directory(".."));

    let result = sim.copy("docs", None);
    assert!(matches!(result, Err(OpError::Unsupported(_))));
    assert_eq!(sim.list_children().len(), 1);
    assert!(sim.change_directory("docs"));
    assert_eq!(sim.file_content("a.txt").unwrap(), "hi");
}

#[test]
fn copy_collisions_number_deterministically() {
    let mut sim = Simulator::ephemeral();
    sim.make_directory("dest").unwrap();
    sim.make_file("report.txt", "v1").unwrap();
    sim.copy("report.txt", Some("dest")).unwrap();

    let first = sim.copy("report.txt", Some("dest")).unwrap();
    let second = sim.copy("report.txt", Some("dest")).unwrap();
    assert_eq!(first.final_name, "report1.txt");
    assert_eq!(second.final_name, "report2.txt");

    let names: Vec<String> = sim
        .list_directory(Some("/dest"))
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["report.txt", "report1.txt", "report2.txt"]);
}

#[test]
fn copy_naming_of_dotfiles_and_extensionless_names() {
    let mut sim = Simulator::ephemeral();
    sim.make_file(".bashrc", "").unwrap();
    sim.make_file("Makefile", "").unwrap();
    sim.make_file("archive.tar.gz", "").unwrap();
    assert_eq!(sim.copy(".bashrc", None).unwrap().final_name, ".bashrc1");
    assert_eq!(sim.copy("Makefile", None).unwrap().final_name, "Makefile1");
    assert_eq!(
        sim.copy("archive.tar.gz", None).unwrap().final_name,
        "archive.tar1.gz"
    );
}

#[test]
fn cd_up_from_root_fails_and_moves_one_level_elsewhere() {
    let mut sim = Simulator::ephemeral();
    assert!(!sim.change_directory(".."));
    assert_eq!(sim.current_path(), "/");

    sim.make_directory("a").unwrap();
    sim.change_directory("a");
    sim.make_directory("b").unwrap();
    sim.change_directory("b");
    assert_eq!(sim.current_path(), "/a/b");
    assert!(sim.change_directory(".."));
    assert_eq!(sim.current_path(), "/a");
}

#[test]
fn removed_subtree_is_unreachable() {
    let mut sim = Simulator::ephemeral();
    sim.make_directory("a").unwrap();
    sim.change_directory_path("/a");
    sim.make_directory("b").unwrap();
    sim.change_directory_path("/a/b");
    sim.make_file("leaf.txt", "x").unwrap();
    sim.change_directory_path("/");

    sim.remove("a").unwrap();
    for path in ["/a", "/a/b", "a/b"] {
        assert!(sim.list_directory(Some(path)).is_err(), "{path} still resolves");
    }
    assert_eq!(sim.stats().files, 0);
    assert_eq!(sim.tree().len(), 1);
}

#[test]
fn removing_a_file_leaves_siblings() {
    let mut sim = Simulator::ephemeral();
    sim.make_file("keep", "").unwrap();
    sim.make_file("drop", "").unwrap();
    sim.remove("drop").unwrap();
    let listing = sim.list_children();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "keep");
    assert_eq!(listing[0].kind, NodeKind::File);
}

#[test]
fn paths_resolve_with_dots_and_trailing_slashes() {
    let mut sim = Simulator::ephemeral();
    sim.make_directory("a").unwrap();
    sim.change_directory("a");
    sim.make_directory("b").unwrap();
    sim.make_file("f", "").unwrap();

    assert!(sim.change_directory_path("b/"));
    assert_eq!(sim.current_path(), "/a/b");
    assert!(sim.change_directory_path("../../../.."));
    assert_eq!(sim.current_path(), "/");
    assert!(sim.change_directory_path("./a//b/."));
    assert_eq!(sim.current_path(), "/a/b");
    assert!(!sim.change_directory_path("/a/f"));
    assert_eq!(sim.current_path(), "/a/b");
}

#[test]
fn rename_to_taken_name_fails_with_collision() {
    let mut sim = Simulator::ephemeral();
    sim.make_file("a", "1").unwrap();
    sim.make_file("b", "2").unwrap();
    assert_eq!(sim.rename("a", "b"), Err(OpError::NameCollision("b".into())));
    assert_eq!(sim.file_content("a").unwrap(), "1");
    assert_eq!(sim.file_content("b").unwrap(), "2");
    assert!(matches!(sim.rename("a", ""), Err(OpError::InvalidName(_))));
}
