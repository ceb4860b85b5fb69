//! Deterministic team avatar generation.
//!
//! Teams are created lazily the first time a completion is observed, so
//! nobody uploads an avatar for them. Instead each team gets a generated
//! SVG: a gradient whose hue is hashed from the team name, with the team's
//! initials on top. The same name always produces the same avatar.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Generates a data-URL SVG avatar for a team name.
///
/// # Examples
///
/// ```
/// use taskboard::progress::generate_team_avatar;
///
/// let avatar = generate_team_avatar("team-alpha");
/// assert!(avatar.starts_with("data:image/svg+xml;base64,"));
/// // Deterministic:
/// assert_eq!(avatar, generate_team_avatar("team-alpha"));
/// ```
pub fn generate_team_avatar(team_name: &str) -> String {
    let initials = initials(team_name);
    let hash = name_hash(team_name);
    let hue = (hash % 360).abs();

    let svg = format!(
        concat!(
            r#"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<defs><linearGradient id="grad{hash}" x1="0%" y1="0%" x2="100%" y2="100%">"#,
            r#"<stop offset="0%" style="stop-color:hsl({hue}, 70%, 50%);stop-opacity:1" />"#,
            r#"<stop offset="100%" style="stop-color:hsl({hue2}, 70%, 60%);stop-opacity:1" />"#,
            r#"</linearGradient></defs>"#,
            r#"<rect width="100" height="100" fill="url(#grad{hash})" />"#,
            r#"<text x="50" y="50" font-family="Arial, sans-serif" font-size="40" font-weight="bold" "#,
            r#"fill="white" text-anchor="middle" dominant-baseline="central">{initials}</text>"#,
            r#"</svg>"#,
        ),
        hash = hash,
        hue = hue,
        hue2 = (hue + 60) % 360,
        initials = initials,
    );

    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// First character of each whitespace-separated word, uppercased, capped at
/// two characters.
fn initials(team_name: &str) -> String {
    team_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect()
}

/// Simple 31x rolling hash over the name's characters, wrapping at i32.
fn name_hash(team_name: &str) -> i32 {
    let mut hash: i32 = 0;
    for c in team_name.chars() {
        hash = (c as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }
    hash
}
