use crate::domain::model::InviteList;

pub fn format_invite_line(id: impl std::fmt::Display, name: &str) -> String {
    format!("Customer ID - {} Customer Name - {}", id, name)
}

/// One newline-terminated line per invite, in list order. Empty list -> empty string.
pub fn format_invite_list(invites: &InviteList) -> String {
    let mut output = String::new();
    for entry in invites {
        output.push_str(&format_invite_line(&entry.id, &entry.name));
        output.push('\n');
    }
    output
}
