//! Menu commands and menu text.

/// Prompt shown when waiting for a menu command.
pub const COMMAND_PROMPT: &str = "> ";

/// Menu printed by the key dialog.
///
/// `I` and `D` are listed but not routed yet: records are only browsed from
/// here, and typing either one reports an unknown command.
pub const KEY_MENU: &str = " NI - New Item
 NF - New Foreign Key
 DF - Delete field
 I  - New record
 D  - Delete record
 V  - View all records
 Q  - Quit
";

/// Menu printed by the database dialog.
pub const DATABASE_MENU: &str = " NK - New Key
 OK - Open Key
 DK - Delete Key
 Q  - Quit
";

/// A command read at the key dialog menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Create an item field.
    NewItem,
    /// Create a foreign key field.
    NewForeignKey,
    /// Delete a child field.
    DeleteField,
    /// Show every record under the key.
    View,
    /// Leave the dialog.
    Quit,
    /// Anything else, as typed.
    Unknown(String),
}

impl KeyCommand {
    /// Parse a menu line, ignoring case. The line is matched as typed, so
    /// padding or an empty line yields [`Self::Unknown`].
    pub fn parse(line: &str) -> Self {
        match line.to_uppercase().as_str() {
            "NI" => KeyCommand::NewItem,
            "NF" => KeyCommand::NewForeignKey,
            "DF" => KeyCommand::DeleteField,
            "V" => KeyCommand::View,
            "Q" => KeyCommand::Quit,
            _ => KeyCommand::Unknown(line.to_string()),
        }
    }
}

/// A command read at the database dialog menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseCommand {
    /// Create a key field.
    NewKey,
    /// Open the dialog for a key field.
    OpenKey,
    /// Delete a key field.
    DeleteKey,
    /// Leave the dialog.
    Quit,
    /// Anything else, as typed.
    Unknown(String),
}

impl DatabaseCommand {
    /// Parse a menu line, ignoring case. The line is matched as typed, so
    /// padding or an empty line yields [`Self::Unknown`].
    pub fn parse(line: &str) -> Self {
        match line.to_uppercase().as_str() {
            "NK" => DatabaseCommand::NewKey,
            "OK" => DatabaseCommand::OpenKey,
            "DK" => DatabaseCommand::DeleteKey,
            "Q" => DatabaseCommand::Quit,
            _ => DatabaseCommand::Unknown(line.to_string()),
        }
    }
}
