//! Chat payloads sent to the completion API. The front end is German, so
//! the prompts are too.

use crate::upstream::ChatMessage;

use super::model::FullPlanRequest;

pub const MUSIC_PLAN_MAX_TOKENS: u32 = 700;
pub const DRINKS_AND_SNACKS_MAX_TOKENS: u32 = 700;
pub const DRINKING_GAMES_MAX_TOKENS: u32 = 500;
pub const FULL_PLAN_MAX_TOKENS: u32 = 1200;

const FOOD_MARKER: &str = "mit passendem essen";

const MUSIC_CURATOR: &str = r#"Du bist ein erfahrener Party-Musik-Kurator.
Gib AUSSCHLIESSLICH valides JSON zurück:
{
  "spotify": [
    {"title":"", "note":"", "tags":["",""]}
  ],
  "youtube": [
    {"title":"", "note":"", "tags":["",""]}
  ]
}
Regeln:
- Je Plattform 5–8 Vorschläge.
- title: prägnanter, suchbarer Playlist-Titel (keine Emojis).
- note: 1 kurze Zeile, warum es passt (Stimmung/Tempo/Decade/Genre).
- tags: 2–5 kurze Tags (z.B. 90s, EDM, deutsch, energy, chill).
- Keine URLs/Emojis/Markdown. Nur JSON."#;

const DRINKS_PLANNER: &str = r#"Du bist ein kreativer deutscher Party-Planer.
Plane jede Art von Party, ohne Motto, ohne Einladungstext, ohne Budgetplan.
Fokus: Getränke (alkoholisch im Vordergrund), kleine Snacks.
Nur wenn "mit passendem Essen" erwähnt wird, auch Gerichte einplanen."#;

const DRINKING_GAMES: &str = "Du bist ein Trinkspiel-Generator.
Gib 4 Trinkspiele aus: 2 bekannte Klassiker, 2 neue kreative Eigenkreationen.
Beschreibe kurz die Regeln. Sprache: Deutsch.";

/// True when the party description asks for proper dishes instead of snacks.
pub fn wants_food(description: &str) -> bool {
    description.to_lowercase().contains(FOOD_MARKER)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Ja" } else { "Nein" }
}

pub fn music_plan(description: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(MUSIC_CURATOR),
        ChatMessage::user(format!("Beschreibung: {description}")),
    ]
}

pub fn drinks_and_snacks(description: &str) -> Vec<ChatMessage> {
    let food = if wants_food(description) {
        "Mit Essen"
    } else {
        "Nur Snacks"
    };
    vec![
        ChatMessage::system(DRINKS_PLANNER),
        ChatMessage::user(format!("Plane folgende Party: {description}. Essen: {food}")),
    ]
}

pub fn drinking_games() -> Vec<ChatMessage> {
    vec![ChatMessage::system(DRINKING_GAMES)]
}

pub fn full_plan(description: &str, req: &FullPlanRequest) -> Vec<ChatMessage> {
    let section = |flag: bool, title: &'static str| if flag { title } else { "" };

    let system = format!(
        "Du bist ein kreativer, flexibler deutscher Partyplaner.
Du kannst jede Art von Party planen – mit oder ohne Motto.
Output-Gliederung:
1. Kurze Zusammenfassung
2. Getränke (alkoholisch & alkoholfrei, Mengen)
3. Essen/Snacks: Falls \"mit passendem Essen\" → 2–3 Gerichte, sonst nur Snacks
4. {deco}
5. {invite}
6. {budget}
Kein Emoji, klare Abschnitte, lockere Sprache.
Ende: Hinweis, dass es nur Vorschläge sind.",
        deco = section(req.with_deco, "Deko-Ideen"),
        invite = section(req.with_invite, "Einladungstext"),
        budget = section(req.with_budget, "Budget-Schätzung"),
    );

    let food = if wants_food(description) {
        "Mit passendem Essen"
    } else {
        "Nur Snacks"
    };
    let user = format!(
        "Beschreibung: {description}
Snacks/Essen: {food}
Deko-Ideen: {deco}
Einladungstext: {invite}
Budget: {budget}",
        deco = yes_no(req.with_deco),
        invite = yes_no(req.with_invite),
        budget = yes_no(req.with_budget),
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
