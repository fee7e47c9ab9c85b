use std::fs;
use std::path::Path;

use polyalign::error::Error;
use polyalign::layout::Layout;
use polyalign::processing::align::{run, AlignOptions, AlignOutcome};
use polyalign::processing::{ConflictPolicy, EmptyPairPolicy};

fn write(root: &Path, rel: &str, content: &str) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

#[test_log::test]
fn end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    write(
        &root,
        "A-B/EDU/x/translation_text/source_reviewed/f1.txt",
        "hello\tworld\n",
    );
    write(
        &root,
        "B-C/EDU/y/translation_text/source_reviewed/f2.txt",
        "hello\tbonjour\n",
    );
    let dst = dir.path().join("out/universal.tsv");

    let options = AlignOptions {
        min_fraction: 0.5,
        ..Default::default()
    };
    let outcome = run(&root, &dst, Layout::default(), options).unwrap();

    assert_eq!(
        outcome,
        AlignOutcome::Written {
            rows: 1,
            path: dst.clone()
        }
    );
    assert_eq!(
        fs::read_to_string(&dst).unwrap(),
        "source\tA-B\tB-C\nhello\tworld\tbonjour\n"
    );
}

#[test_log::test]
fn relaxed_coverage_with_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    // "shared" is in 3 of 5 pairs, "pair" in 2 of 5.
    write(
        &root,
        "HIN-BAN/EDU/a/translation_text/source_reviewed/1.txt",
        "shared\tban\npair\tban-p\n",
    );
    write(
        &root,
        "HIN-ODI/EDU/a/translation_text/source_reviewed/1.txt",
        "shared\todi\npair\todi-p\n",
    );
    write(
        &root,
        "HIN-MAI/GOV/b/translation_text/source_reviewed/1.txt",
        "shared\tmai\n",
    );
    write(
        &root,
        "HIN-SAT/EDU/a/translation_text/source_reviewed/1.txt",
        "alone\tsat\n",
    );
    write(
        &root,
        "HIN-ASM/EDU/a/translation_text/source_reviewed/1.txt",
        "lonely\tasm\n",
    );
    let dst = dir.path().join("out.tsv");

    let outcome = run(&root, &dst, Layout::default(), AlignOptions::default()).unwrap();
    assert!(matches!(outcome, AlignOutcome::Written { rows: 1, .. }));

    let content = fs::read_to_string(&dst).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "source\tHIN-ASM\tHIN-BAN\tHIN-MAI\tHIN-ODI\tHIN-SAT");
    assert_eq!(lines[1], "shared\t\tban\tmai\todi\t");
    assert_eq!(lines[1].split('\t').count(), 6);
    assert_eq!(lines.len(), 2);
}

#[test_log::test]
fn unreadable_and_malformed_files_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    write(
        &root,
        "A-B/EDU/x/translation_text/source_reviewed/good.txt",
        "s\tt\nno tab\n",
    );
    // invalid UTF-8
    let bad = root.join("A-B/EDU/x/translation_text/source_reviewed/bad.txt");
    fs::write(&bad, [0xffu8, 0xfe, b'\n']).unwrap();
    // misplaced file
    write(&root, "A-B/translation_text/source_reviewed/shallow.txt", "z\tz\n");
    let dst = dir.path().join("out.tsv");

    let outcome = run(&root, &dst, Layout::default(), AlignOptions::default()).unwrap();
    assert!(matches!(outcome, AlignOutcome::Written { rows: 1, .. }));
    assert_eq!(fs::read_to_string(&dst).unwrap(), "source\tA-B\ns\tt\n");
}

#[test_log::test]
fn empty_pairs_policy() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "A-B/EDU/x/translation_text/source_reviewed/f.txt", "x\t1\n");
    write(&root, "A-C/EDU/x/translation_text/source_reviewed/f.txt", "x\t2\n");
    for lp in ["A-D", "A-E", "A-F"] {
        fs::create_dir_all(root.join(lp)).unwrap();
    }
    let dst = dir.path().join("out.tsv");

    let counted = run(&root, &dst, Layout::default(), AlignOptions::default()).unwrap();
    assert_eq!(
        counted,
        AlignOutcome::NoSourcesSelected {
            lp_count: 5,
            min_required: 3
        }
    );
    assert!(!dst.exists());

    let options = AlignOptions {
        empty_pairs: EmptyPairPolicy::Ignore,
        ..Default::default()
    };
    let ignored = run(&root, &dst, Layout::default(), options).unwrap();
    assert!(matches!(ignored, AlignOutcome::Written { rows: 1, .. }));
    // empty pairs still get a column
    assert_eq!(
        fs::read_to_string(&dst).unwrap(),
        "source\tA-B\tA-C\tA-D\tA-E\tA-F\nx\t1\t2\t\t\t\n"
    );
}

#[test_log::test]
fn conflict_policies() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "A-B/EDU/a/translation_text/source_reviewed/f.txt", "x\tfirst\n");
    write(&root, "A-B/EDU/b/translation_text/source_reviewed/f.txt", "x\tsecond\n");
    let dst = dir.path().join("out.tsv");

    run(&root, &dst, Layout::default(), AlignOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&dst).unwrap(), "source\tA-B\nx\tsecond\n");

    let options = AlignOptions {
        conflict: ConflictPolicy::FirstWins,
        ..Default::default()
    };
    run(&root, &dst, Layout::default(), options).unwrap();
    assert_eq!(fs::read_to_string(&dst).unwrap(), "source\tA-B\nx\tfirst\n");

    let options = AlignOptions {
        conflict: ConflictPolicy::Reject,
        ..Default::default()
    };
    assert!(matches!(
        run(&root, &dst, Layout::default(), options),
        Err(Error::Conflict { .. })
    ));
}

#[test_log::test]
fn domain_and_stage_selection() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "A-B/EDU/a/translation_text/source_reviewed/f.txt", "edu\t1\n");
    write(&root, "A-B/GOV/a/translation_text/source_reviewed/f.txt", "gov\t2\n");
    write(&root, "A-B/GOV/a/translation_text/source_translated/f.txt", "mt\t3\n");
    let dst = dir.path().join("out.tsv");

    let layout = Layout::default().with_stages(vec![
        "source_reviewed".to_string(),
        "source_translated".to_string(),
    ]);
    let options = AlignOptions {
        domains: Some(vec!["GOV".to_string()]),
        ..Default::default()
    };
    run(&root, &dst, layout, options).unwrap();

    assert_eq!(
        fs::read_to_string(&dst).unwrap(),
        "source\tA-B\ngov\t2\nmt\t3\n"
    );
}
