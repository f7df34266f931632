use crate::AppCommand;

/// WHAT: Well-formed lines parse to their commands
/// WHY: The console is the only event source for the app loop
#[test]
fn given_valid_lines_when_parsing_then_commands_returned() {
    assert_eq!(
        AppCommand::parse("login sam hunter2"),
        Some(AppCommand::Login {
            username: "sam".to_string(),
            password: "hunter2".to_string(),
        })
    );
    assert_eq!(AppCommand::parse("open 7"), Some(AppCommand::Open { book_id: 7 }));
    assert_eq!(AppCommand::parse("  record  "), Some(AppCommand::Record));
    assert_eq!(AppCommand::parse("prev"), Some(AppCommand::Previous));
    assert_eq!(AppCommand::parse("previous"), Some(AppCommand::Previous));
    assert_eq!(AppCommand::parse("pause"), Some(AppCommand::Play));
    assert_eq!(AppCommand::parse("exit"), Some(AppCommand::Quit));
}

/// WHAT: Malformed lines parse to None
/// WHY: The reader prints usage instead of feeding garbage to the loop
#[test]
fn given_invalid_lines_when_parsing_then_none() {
    assert_eq!(AppCommand::parse(""), None);
    assert_eq!(AppCommand::parse("   "), None);
    assert_eq!(AppCommand::parse("teleport"), None);
    // Missing arguments
    assert_eq!(AppCommand::parse("login sam"), None);
    assert_eq!(AppCommand::parse("open"), None);
    assert_eq!(AppCommand::parse("open seven"), None);
}
