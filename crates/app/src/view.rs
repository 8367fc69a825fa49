//! Plain-text rendering of results, card details and collection statistics.

use std::fmt::Write;

use cardbinder_core::{Card, Collection, CollectionStats, EnergyType, SearchSnapshot, TypeModifier};

const PLACEHOLDER: &str = "—";

/// Render a published search snapshot as a results list.
pub fn render_results(snapshot: &SearchSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Results for \"{}\" ({} card{})",
        snapshot.term,
        snapshot.cards.len(),
        if snapshot.cards.len() == 1 { "" } else { "s" }
    );
    for card in &snapshot.cards {
        let _ = writeln!(out, "  {}", card_line(card));
    }
    if snapshot.cards.is_empty() {
        let _ = writeln!(out, "  (no cards found)");
    }
    out
}

fn card_line(card: &Card) -> String {
    format!(
        "{:<16} {:<24} {:<20} {}",
        card.id,
        card.name,
        card.rarity.as_deref().unwrap_or(PLACEHOLDER),
        card.set_name().unwrap_or(PLACEHOLDER)
    )
}

/// Render the detail view of one card.
pub fn render_card_detail(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", card.name, card.id);
    let _ = writeln!(
        out,
        "  Rarity:      {}",
        card.rarity.as_deref().unwrap_or(PLACEHOLDER)
    );
    let _ = writeln!(out, "  Set:         {}", card.set_name().unwrap_or(PLACEHOLDER));
    let _ = writeln!(
        out,
        "  HP:          {}",
        card.hp.map(|hp| hp.to_string()).as_deref().unwrap_or(PLACEHOLDER)
    );
    let _ = writeln!(out, "  Types:       {}", energy_list(&card.types));

    if card.attacks.is_empty() {
        let _ = writeln!(out, "  Attacks:     {}", PLACEHOLDER);
    } else {
        let _ = writeln!(out, "  Attacks:");
        for attack in &card.attacks {
            let damage = if attack.damage.is_empty() {
                PLACEHOLDER
            } else {
                attack.damage.as_str()
            };
            let _ = writeln!(
                out,
                "    {} {} {}",
                icon_row_for(&attack.cost),
                attack.name,
                damage
            );
            if let Some(text) = &attack.text {
                let _ = writeln!(out, "      {}", text);
            }
        }
    }

    let _ = writeln!(out, "  Weaknesses:  {}", modifier_list(&card.weaknesses));
    let _ = writeln!(out, "  Resistances: {}", modifier_list(&card.resistances));
    let _ = writeln!(
        out,
        "  Retreat:     {}",
        if card.retreat_cost.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            icon_row_for(&card.retreat_cost)
        }
    );
    let _ = writeln!(
        out,
        "  Artist:      {}",
        card.artist.as_deref().unwrap_or(PLACEHOLDER)
    );
    if let Some(flavor) = &card.flavor_text {
        let _ = writeln!(out, "  \"{}\"", flavor);
    }
    if let Some(url) = &card.market.tcgplayer {
        let _ = writeln!(out, "  TCGplayer:   {}", url);
    }
    if let Some(url) = &card.market.cardmarket {
        let _ = writeln!(out, "  Cardmarket:  {}", url);
    }
    if let Some(url) = card.images.as_ref().and_then(|i| i.large.as_ref()) {
        let _ = writeln!(out, "  Image:       {}", url);
    }
    out
}

fn energy_list(types: &[EnergyType]) -> String {
    if types.is_empty() {
        return PLACEHOLDER.to_string();
    }
    types
        .iter()
        .map(EnergyType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn modifier_list(modifiers: &[TypeModifier]) -> String {
    if modifiers.is_empty() {
        return PLACEHOLDER.to_string();
    }
    modifiers
        .iter()
        .map(|m| format!("{} {}", m.energy, m.value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Icons for a cost list; unknown types are skipped.
fn icon_row_for(cost: &[EnergyType]) -> String {
    cost.iter().filter_map(EnergyType::icon).collect()
}

/// Render `(type, n)` pairs as `n` icons each; unknown types are skipped.
fn icon_row(counts: &[(EnergyType, u32)]) -> String {
    let mut row = String::new();
    for (energy, n) in counts {
        if let Some(icon) = energy.icon() {
            row.push_str(&icon.repeat(*n as usize));
        }
    }
    row
}

/// Render the collection and its statistics panel.
///
/// The panel is hidden while the collection is empty.
pub fn render_collection(collection: &Collection, stats: &CollectionStats) -> String {
    if stats.is_empty() {
        return "Your collection is empty. Add cards with :add <id>.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Collection ({} cards)", stats.card_count);
    for card in collection.cards() {
        let _ = writeln!(out, "  {}", card_line(card));
    }

    let _ = writeln!(out, "Type distribution");
    for (energy, share) in stats.type_shares() {
        let count = stats.type_counts.get(&energy).copied().unwrap_or(0);
        let _ = writeln!(
            out,
            "  {:<10} {:>3} {:>5.1}%  {}",
            energy.as_str(),
            count,
            share,
            energy.color()
        );
    }
    if stats.type_counts.is_empty() {
        let _ = writeln!(out, "  {}", PLACEHOLDER);
    }

    let _ = writeln!(out, "Power levels");
    let _ = writeln!(out, "  Average HP:     {:.1}", stats.average_hp);
    let _ = writeln!(out, "  Average damage: {:.1}", stats.average_damage);

    let _ = writeln!(out, "Energy");
    let _ = writeln!(out, "  Retreat: {}", or_placeholder(icon_row(&stats.retreat_icons())));
    let _ = writeln!(out, "  Attack:  {}", or_placeholder(icon_row(&stats.attack_icons())));
    out
}

fn or_placeholder(row: String) -> String {
    if row.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        row
    }
}
