use chrono::NaiveDate;
use consolidate_engine::*;
use consolidate_types::{CollisionPolicy, DateStrategy, LayoutMode, ProjectInstance};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// 2020-05-10T12:00:00Z
const OLD: i64 = 1_589_112_000;
// 2023-09-01T12:00:00Z
const NEW: i64 = 1_693_569_600;

fn write(root: &Path, rel: &str, content: &str, mtime: i64) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
}

fn discover(root: &Path) -> ProjectIndex {
    let ignore = IgnoreSet::defaults();
    let crawler = Crawler::new(&ignore, &NullLogger);
    let dates = DateResolver::new(DateStrategy::Filesystem, &ignore);
    let mut identities = IdentityResolver::new();
    let mut index = ProjectIndex::new();

    for project in crawler.crawl(root) {
        let identity = identities.resolve(&project, &NullLogger);
        let date = dates.resolve(&project.path, &NullLogger);
        index.insert(ProjectInstance::new(project.path, identity.key, date));
    }

    PrimarySelector::new(false)
        .select(&mut index, &mut AcceptDefaults)
        .unwrap();
    index
}

fn sample_tree(root: &Path) {
    write(root, "A/old/package.json", r#"{"name":"foo"}"#, OLD);
    write(root, "A/new/package.json", r#"{"name":"foo"}"#, NEW);
    write(root, "B/tool/requirements.txt", "requests\n", OLD);
    write(root, "B/tool/.git/HEAD", "ref", NEW);
    write(root, "C/node_modules/dep/package.json", r#"{"name":"dep"}"#, NEW);
}

#[test]
fn test_duplicate_copies_form_one_group() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());
    let index = discover(temp.path());

    assert_eq!(index.len(), 2);
    assert_eq!(index.project_count(), 3);

    let foo = index.get(&"foo".into()).unwrap();
    assert_eq!(foo.len(), 2);
    let primary = foo.primary().unwrap();
    assert!(primary.source_path.ends_with("A/new"));
    assert_eq!(
        primary.representative_date,
        NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()
    );
}

#[test]
fn test_every_group_has_one_primary_and_gapless_versions() {
    let temp = TempDir::new().unwrap();
    for (i, mtime) in [OLD, OLD + 86_400, OLD + 2 * 86_400, NEW].iter().enumerate() {
        write(
            temp.path(),
            &format!("copies/c{}/package.json", i),
            r#"{"name":"shared"}"#,
            *mtime,
        );
    }

    let mut index = discover(temp.path());
    let out = temp.path().join("Out");
    DestinationPlanner::new(&out, LayoutMode::Dated, CollisionPolicy::Suffix)
        .plan(&mut index)
        .unwrap();

    for group in index.groups() {
        assert_eq!(group.primary_count(), 1);
    }

    let group = index.get(&"shared".into()).unwrap();
    let primary_dest = group.primary().unwrap().destination_path.clone().unwrap();
    assert_eq!(primary_dest, out.join("2023").join("c3"));

    let versions: Vec<String> = group
        .secondaries()
        .map(|m| {
            m.destination_path
                .as_ref()
                .unwrap()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect();
    assert_eq!(versions, vec!["v1_c2", "v2_c1", "v3_c0"]);
}

#[test]
fn test_ignored_directories_never_discovered() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());
    let index = discover(temp.path());

    for instance in index.instances() {
        let path = instance.source_path.to_string_lossy();
        assert!(!path.contains("node_modules"), "{}", path);
        assert!(!path.contains(".git"), "{}", path);
    }
}

#[test]
fn test_discovery_is_idempotent() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    let first = Manifest::snapshot(&discover(temp.path()), false).to_json().unwrap();
    let second = Manifest::snapshot(&discover(temp.path()), false).to_json().unwrap();
    assert_eq!(first, second);

    let written = temp.path().join("reports/manifest.json");
    let manifest = Manifest::snapshot(&discover(temp.path()), false);
    ManifestWriter.write(&manifest, &written).unwrap();
    assert_eq!(Manifest::load(&written).unwrap(), manifest);
}

#[test]
fn test_layout_switch_keeps_groups_and_keys() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());
    let out = temp.path().join("Out");

    let mut dated = discover(temp.path());
    DestinationPlanner::new(&out, LayoutMode::Dated, CollisionPolicy::Suffix)
        .plan(&mut dated)
        .unwrap();
    let mut flat = discover(temp.path());
    DestinationPlanner::new(&out, LayoutMode::Flat, CollisionPolicy::Suffix)
        .plan(&mut flat)
        .unwrap();

    let dated_manifest = Manifest::snapshot(&dated, true);
    let flat_manifest = Manifest::snapshot(&flat, true);
    assert_eq!(
        dated_manifest.groups().keys().collect::<Vec<_>>(),
        flat_manifest.groups().keys().collect::<Vec<_>>()
    );

    let foo_dated = dated_manifest.get("foo").unwrap();
    let foo_flat = flat_manifest.get("foo").unwrap();
    assert_eq!(
        foo_dated[1].destination_path.as_deref().map(Path::new),
        Some(out.join("2023/new/.versions/v1_old").as_path())
    );
    assert_eq!(
        foo_flat[1].destination_path.as_deref().map(Path::new),
        Some(out.join("new/.versions/v1_old").as_path())
    );
}

#[test]
fn test_full_migration_moves_primary_and_versions() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("share");
    sample_tree(&root);
    let out = temp.path().join("Out");

    let mut index = discover(&root);
    DestinationPlanner::new(&out, LayoutMode::Dated, CollisionPolicy::Suffix)
        .plan(&mut index)
        .unwrap();

    let transferer = Transferer::new(consolidate_types::TransferMode::Move, &NullLogger);
    for instance in index.instances() {
        let destination = instance.destination_path.as_ref().unwrap();
        let report = transferer.transfer(&instance.source_path, destination, &mut NoProgress);
        assert!(report.is_clean(), "{:?}", report.failures);
    }

    assert!(out.join("2023/new/package.json").is_file());
    assert!(out.join("2023/new/.versions/v1_old/package.json").is_file());
    assert!(!root.join("A/new").exists());
    assert!(!root.join("A/old").exists());
}
