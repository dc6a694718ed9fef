use super::*;

// =============================================================
// ChatEntry display
// =============================================================

#[test]
fn local_me_displays_as_tu() {
    let mut log = ChatLog::new();
    log.local("Me", "ciao a tutti");
    assert_eq!(log.last().unwrap().display_author(), "Tu");
}

#[test]
fn remote_me_is_not_rewritten() {
    // A remote participant whose label happens to be "Me" keeps it.
    let mut log = ChatLog::new();
    log.remote("Me", "hello");
    assert_eq!(log.last().unwrap().display_author(), "Me");
}

#[test]
fn other_authors_display_verbatim() {
    let mut log = ChatLog::new();
    log.local("Dice", "Hai rollato d6: 4");
    assert_eq!(log.last().unwrap().display_author(), "Dice");
}

// =============================================================
// ChatLog appends
// =============================================================

#[test]
fn local_entries_are_not_remote() {
    let mut log = ChatLog::new();
    log.local("Me", "x");
    let entry = log.last().unwrap();
    assert!(!entry.remote);
    assert_eq!(entry.kind, MessageKind::Normal);
}

#[test]
fn remote_entries_carry_the_flag() {
    let mut log = ChatLog::new();
    log.remote("Giocatore", "x");
    assert!(log.last().unwrap().remote);
}

#[test]
fn system_entries_have_system_kind() {
    let mut log = ChatLog::new();
    log.system("Connesso. Il tuo ID è pronto.");
    let entry = log.last().unwrap();
    assert!(entry.is_system());
    assert!(!entry.remote);
    assert_eq!(entry.body, "Connesso. Il tuo ID è pronto.");
}

#[test]
fn entries_keep_arrival_order() {
    let mut log = ChatLog::new();
    log.system("first");
    log.local("Me", "second");
    log.remote("B", "third");

    let bodies: Vec<&str> = log.iter().map(|e| e.body.as_str()).collect();
    assert_eq!(bodies, ["first", "second", "third"]);
    assert_eq!(log.len(), 3);
}

#[test]
fn empty_log() {
    let log = ChatLog::new();
    assert!(log.is_empty());
    assert!(log.last().is_none());
}
