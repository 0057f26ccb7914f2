//! Scripted console sessions against the sample plant.

use alert_console::Console;
use alerting::{AlertStatus, HistoryKind};

fn run_script(script: &str) -> (Console, String) {
    let mut console = Console::sample(None).unwrap();
    let mut out = Vec::new();
    console.run(script.as_bytes(), &mut out).unwrap();
    (console, String::from_utf8(out).unwrap())
}

#[test]
fn test_acknowledge_then_resolve_a003() {
    let (console, out) = run_script(
        "ack a003\n\
         reason Removed metal object\n\
         confirm\n\
         resolve a003\n\
         history a003\n",
    );

    let a003 = console.store().get("a003").unwrap();
    assert_eq!(a003.status(), AlertStatus::Resolved);
    let kinds: Vec<_> = a003.history().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![HistoryKind::Acknowledgment, HistoryKind::Resolution]);
    assert_eq!(a003.history().entries()[0].proof_file, None);

    assert!(out.contains("a003: Acknowledged by Unknown user"));
    assert!(out.contains("a003: Resolved by Unknown user"));
    assert!(out.contains("Reason: Removed metal object"));
}

#[test]
fn test_assign_proof_and_newest_history() {
    let (console, out) = run_script(
        "assign a001 Sachi Gupta\n\
         ack a001\n\
         reason Cleared jam\n\
         proof jam_photo.png\n\
         confirm\n\
         history a001 --newest\n",
    );

    let a001 = console.store().get("a001").unwrap();
    assert_eq!(a001.assigned(), Some("Sachi Gupta"));
    assert_eq!(a001.status(), AlertStatus::Acknowledged);
    assert_eq!(a001.history().len(), 2);
    assert_eq!(a001.history().entries()[1].proof_file.as_deref(), Some("jam_photo.png"));

    assert!(out.contains("Proof attached: jam_photo.png"));
    let acknowledged = out.rfind("Acknowledged by Sachi Gupta").unwrap();
    let assigned = out.rfind("Assigned to Sachi Gupta").unwrap();
    assert!(acknowledged < assigned, "newest entry should print first");
}

#[test]
fn test_refusals_leave_state_untouched() {
    let (console, out) = run_script(
        "assign a004 John Doe\n\
         unassign a004\n\
         resolve zzz\n\
         proof notes.pdf\n\
         ack a004\n\
         proof notes.pdf\n\
         cancel\n\
         resolve a006\n\
         resolve a006\n",
    );

    let a004 = console.store().get("a004").unwrap();
    assert!(a004.assigned().is_none());
    assert!(a004.history().is_empty());
    assert_eq!(a004.status(), AlertStatus::New);
    assert!(!console.dialog().is_open());

    let a006 = console.store().get("a006").unwrap();
    assert_eq!(a006.history().len(), 1);

    assert!(out.contains("Refused: Unknown user: John Doe"));
    assert!(out.contains("Refused: Alert a004 has no assigned user"));
    assert!(out.contains("Refused: Alert not found: zzz"));
    assert!(out.contains("Refused: Unsupported proof attachment: notes.pdf"));
    assert!(out.contains("Resolve is not available for a006 (resolved)"));
}

#[test]
fn test_list_filters_and_summary() {
    let (_, out) = run_script("list critical new\nlist info resolved\nsummary\n");

    assert!(out.contains("Metal object detected on belt"));
    assert!(out.contains("Showing 1 of 6 alerts"));
    assert!(out.contains("No alerts match your filters"));
    assert!(out.contains("Alerts: 6 total, 6 active (2 critical, 3 warning), 4 unassigned"));
    assert!(out.contains(
        "Plant: 5 conveyors (3 operational, 1 warning, 1 critical), 1845 t/h, 82.8% avg efficiency"
    ));
}

#[test]
fn test_bad_input_reports_usage() {
    let (_, out) = run_script("frobnicate\nlist all all many\nshow\n");
    assert!(out.contains("Unknown command 'frobnicate'"));
    assert!(out.contains("Invalid argument: limit 'many' is not a number"));
    assert!(out.contains("Usage: show <id>"));
}
