use pretty_assertions::assert_eq;
use std::io::Write;
use tombgraph_cli::*;
use tombgraph_core::GraphConfig;
use tombgraph_test_utils::{assert_children, child_name};

fn run(shell: &Shell, script: &str) -> (String, RunSummary) {
    let mut output = Vec::new();
    let summary = shell.run(script.as_bytes(), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), summary)
}

#[test]
fn test_script_renders_shows_and_errors() {
    let shell = Shell::new();
    let script = "\
# build a small graph
create A Parent Node
create B Child B
create C Child C
connect A B
connect A C
show A

remove B
remove B
connect A B
show A
show B
frobnicate A
";
    let (output, summary) = run(&shell, script);

    assert_eq!(
        output,
        "\
Node: \"Parent Node\"
Children:
 - B
 - C
error: node does not exist: B
error: node does not exist: B
Node: \"Parent Node\"
Children:
 - C
B is empty
error: unknown command: frobnicate
"
    );
    assert_eq!(summary.commands, 11);
    assert_eq!(summary.failures, 3);
}

#[test]
fn test_script_duplicate_create_reported() {
    let shell = Shell::new();
    let (output, summary) = run(&shell, "create A one\ncreate A two\nshow A\n");
    assert_eq!(output, "error: node already exists: A\nNode: \"one\"\nChildren: None\n");
    assert_eq!(summary.failures, 1);
}

#[test]
fn test_shell_registry_visible_to_callers() {
    let shell = Shell::new();
    let mut script = String::from("create P parent\n");
    for i in 1..=5 {
        script.push_str(&format!("create {0} child\nconnect P {0}\n", child_name(i)));
    }
    script.push_str("remove B2\nremove B4\n");
    run(&shell, &script);

    let expected: Vec<String> = [1, 3, 5].into_iter().map(child_name).collect();
    assert_children(&shell.registry().show("P"), &expected);
}

#[test]
fn test_demo_compacts_parent() {
    let mut output = Vec::new();
    let summary = run_demo(&mut output, GraphConfig::default()).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(summary.slots_before, DEMO_CHILDREN);
    assert!(summary.slots_after < DEMO_CHILDREN);
    assert!(output.starts_with("Before deletion, A's children:\nNode: \"Parent Node\"\nChildren:\n - B1\n"));
    assert!(output.ends_with("(cleanup should trigger):\nNode: \"Parent Node\"\nChildren: None\n"));
}

#[test]
fn test_config_file_drives_shell() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "compaction_frequency = 1\nstale_ratio = 1").unwrap();

    let config = GraphConfig::from_path(file.path()).unwrap();
    assert_eq!(config.compaction_frequency, 1);

    let shell = Shell::with_config(config);
    run(&shell, "create P p\ncreate C c\nconnect P C\nremove C\nshow P\n");
    assert_eq!(shell.registry().get("P").unwrap().slot_count(), 0);
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "compaction_frequency = 0").unwrap();
    assert!(GraphConfig::from_path(file.path()).is_err());
}

#[test]
fn test_stress_report_passes() {
    let config = StressConfig {
        threads: 4,
        operations_per_thread: 1_000,
        name_pool: 12,
        seed: 99,
    };
    let report = run_stress(&config, GraphConfig::default().with_compaction_frequency(2));
    assert!(report.passed(), "{}", report.generate_text());
    assert_eq!(report.total_operations(), 4_000);
}
