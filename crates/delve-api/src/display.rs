//! HTML rendering of the session for htmx clients.
//!
//! [`HtmlDisplay`] renders the fragment swapped into `#game-board` on every
//! published snapshot; [`page`] wraps a fragment into the full document
//! served at `/`.

use std::fmt::Write as _;

use delve_engine::application::action::Action;
use delve_engine::application::render::Renderer;
use delve_engine::domain::adventure::AdventureState;
use delve_engine::domain::character::{CharacterId, Roster};
use delve_engine::domain::combat::CombatSceneState;
use delve_engine::domain::scene::SceneState;

/// Renders scenes as the terminal-style game board.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDisplay;

impl Renderer for HtmlDisplay {
    fn render(&self, adventure: &AdventureState, scene: &SceneState) -> String {
        let mut html = String::from(r#"<div class="terminal">"#);

        if scene.as_combat().is_some() {
            html.push_str(r#"<h2 class="combat-title">COMBAT</h2>"#);
        }

        html.push_str(r#"<pre class="output">"#);
        html.push_str(&escape_html(scene.output_text()));
        if scene.show_cursor() {
            html.push_str(r#"<span class="cursor">_</span>"#);
        }
        html.push_str("</pre>");

        if let Some(combat) = scene.as_combat() {
            render_turn_order(&mut html, combat, &adventure.characters);
        }

        render_actions(&mut html, scene.actions().iter().chain(&adventure.actions));
        html.push_str("</div>");
        html
    }
}

fn render_turn_order(html: &mut String, combat: &CombatSceneState, roster: &Roster) {
    let current = combat.current_turn_character();
    html.push_str(r#"<ol class="turn-order">"#);
    for id in &combat.turn_order {
        let Some(character) = roster.get(*id) else {
            continue;
        };
        let mut classes = String::from("combatant");
        classes.push_str(if character.is_enemy {
            " enemy"
        } else {
            " friendly"
        });
        if current == Some(*id) {
            classes.push_str(" current");
        }
        if combat.recently_attacked_character == Some(*id) {
            classes.push_str(" hit-flash");
        }
        let _ = write!(
            html,
            r#"<li class="{classes}" data-id="{}"><span class="name">{}</span><span class="hp">HP: {}</span><span class="atk">ATK: {}</span><div class="health-bar"><div class="health-fill" style="width: {}%"></div></div></li>"#,
            character_dom_id(*id),
            escape_html(&character.name),
            character.health,
            character.attack,
            health_percent(character.health),
        );
    }
    html.push_str("</ol>");
}

fn render_actions<'a>(html: &mut String, actions: impl Iterator<Item = &'a Action>) {
    html.push_str(r#"<div class="actions">"#);
    for action in actions {
        let _ = write!(
            html,
            r#"<button class="action" hx-post="/action/{}" hx-swap="none">{}</button>"#,
            encode_path_segment(action.name()),
            escape_html(action.name()),
        );
    }
    html.push_str("</div>");
}

fn character_dom_id(id: CharacterId) -> String {
    format!("character-{id}")
}

/// Width of a health bar: health points, clamped to `0..=100`.
#[must_use]
pub fn health_percent(health: i32) -> i32 {
    health.clamp(0, 100)
}

/// Escapes text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent-encodes an action name for use as one URL path segment.
#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}

/// Wraps a rendered board into the full page, subscribed to `/events`.
#[must_use]
pub fn page(board: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Dungeon Delve</title>
<script src="https://unpkg.com/htmx.org@2.0.4"></script>
<script src="https://unpkg.com/htmx-ext-sse@2.2.2/sse.js"></script>
<style>
body {{ background: #111; color: #4ade80; font-family: monospace; }}
.terminal {{ max-width: 56rem; margin: 2rem auto; padding: 1.5rem; background: #000; border: 8px solid #1f2937; }}
.output {{ white-space: pre-wrap; }}
.cursor {{ animation: blink 1s step-end infinite; }}
@keyframes blink {{ 50% {{ opacity: 0; }} }}
.combatant {{ margin: 0.5rem 0; padding: 0.5rem; border: 1px solid #166534; }}
.combatant.enemy {{ border-color: #991b1b; color: #ef4444; }}
.combatant.current {{ outline: 2px solid currentColor; }}
.hit-flash {{ animation: hit 0.5s ease-in-out; }}
@keyframes hit {{ 0%, 100% {{ background: transparent; }} 50% {{ background: #7f1d1d; }} }}
.health-bar {{ background: #374151; height: 0.6rem; border-radius: 9999px; }}
.health-fill {{ background: currentColor; height: 100%; border-radius: 9999px; }}
.action {{ margin: 0.25rem; padding: 0.5rem 1.5rem; background: #16a34a; color: #000; border: 2px solid #22c55e; }}
#admin-panel button {{ margin: 0.25rem; }}
</style>
</head>
<body hx-ext="sse" sse-connect="/events">
<main id="game-board" sse-swap="message">{board}</main>
<section id="admin-panel">
<button hx-post="/admin/reset-game" hx-swap="none">Reset game</button>
<button hx-post="/admin/add-health" hx-swap="none">Add health</button>
<button hx-post="/admin/add-enemy" hx-swap="none">Add enemy</button>
</section>
</body>
</html>
"#
    )
}
