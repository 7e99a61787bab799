//! Persona construction from catalog records

use holonet_core::{CatalogRecord, ChatTurn};

/// The character fields folded into the persona background block.
const PERSONA_FIELDS: [(&str, &str); 8] = [
    ("name", "Name"),
    ("gender", "Gender"),
    ("birth_year", "Birth Year"),
    ("height", "Height"),
    ("mass", "Mass"),
    ("hair_color", "Hair Color"),
    ("eye_color", "Eye Color"),
    ("skin_color", "Skin Color"),
];

/// Build the system turn that puts the model in character.
///
/// Unknown or non-primitive fields are simply omitted from the background
/// block; the instruction text is always present.
pub fn character_persona(record: &CatalogRecord) -> ChatTurn {
    let background: String = PERSONA_FIELDS
        .iter()
        .filter_map(|(field, label)| {
            record
                .field_text(field)
                .map(|value| format!("{}: {}", label, value))
        })
        .collect::<Vec<_>>()
        .join("\n");

    ChatTurn::system(format!(
        "You are a Star Wars character. Here is your background information:\n{}\n\
         Stay in character while responding, using knowledge and personality \
         consistent with your background. Keep responses concise and authentic \
         to your character's way of speaking.",
        background
    ))
}
