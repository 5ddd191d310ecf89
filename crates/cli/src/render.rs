//! Plain-text rendering for terminal output.

use companion_core::{AttributeImpact, Book, CharacterLayers, CharacterState, Pet};
use companion_runtime::Progress;
use console::style;

const BAR_WIDTH: usize = 20;

fn bar(value: u32, max: u32) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value as usize * BAR_WIDTH) / max as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)))
}

pub fn character(character: &CharacterState) {
    println!(
        "{} level {}  ({} books, {} min read)",
        style("Character").bold(),
        character.current_level,
        character.total_books_read,
        character.total_reading_time_seconds / 60
    );

    for attr in character.ranked() {
        println!(
            "  {} {:<12} {} {:>3}/{} (lv {})",
            attr.icon(),
            attr.kind.to_string(),
            bar(attr.value, attr.max_value),
            attr.value,
            attr.max_value,
            attr.level
        );
    }

    let traits = &character.visual_traits;
    if !traits.accessories.is_empty() || traits.aura != companion_core::Aura::None {
        let accessories: Vec<String> = traits.accessories.iter().map(|a| a.to_string()).collect();
        println!(
            "  unlocked: {} / aura {}",
            accessories.join(", "),
            traits.aura
        );
    }
}

pub fn pet(pet: &Pet) {
    println!(
        "{} {} the {}",
        style("Pet").bold(),
        style(&pet.name).cyan(),
        pet.stage
    );
    let traits = &pet.traits;
    println!(
        "  colors {} / {}  body {}  markings {}",
        traits.primary_color, traits.secondary_color, traits.body_type, traits.marking_style
    );
    if let Some(accessory) = traits.accessory {
        println!("  wearing a {accessory}");
    }
}

pub fn books<'a>(books: impl Iterator<Item = &'a Book>) {
    println!("{}", style("Recent books").bold());
    let mut empty = true;
    for book in books {
        empty = false;
        println!(
            "  {} {} by {} [{}]",
            style(book.date_added.format("%Y-%m-%d")).dim(),
            book.title,
            book.author,
            book.genre
        );
        println!("    {}", style(book.id).dim());
    }
    if empty {
        println!("  (none yet)");
    }
}

pub fn impact(impact: &AttributeImpact) {
    if impact.is_empty() {
        println!("  no attribute gains");
        return;
    }
    let gains: Vec<String> = impact
        .iter()
        .map(|(kind, points)| format!("{} {kind} +{points}", kind.icon()))
        .collect();
    println!("  {}", gains.join("  "));
}

pub fn progress(progress: &Progress, pet: &Pet) {
    if progress.leveled_up() {
        println!(
            "{} level {} → {}",
            style("Level up!").magenta().bold(),
            progress.previous_level,
            progress.current_level
        );
    }
    if progress.stage_changed() {
        println!(
            "{} {} is now {} (was {})",
            style("Evolution!").magenta().bold(),
            pet.name,
            progress.current_stage,
            progress.previous_stage
        );
    }
}

pub fn avatar(layers: &CharacterLayers) {
    if layers.is_placeholder() {
        println!("{} no books yet; log one to shape your avatar", style("Avatar").bold());
        return;
    }

    println!(
        "{} level {} from {} books, dominant color {}",
        style("Avatar").bold(),
        layers.level,
        layers.book_count,
        layers.dominant_color
    );
    let base = &layers.base;
    println!(
        "  core {}-gon, rotation {:.0}°, hue shift {:+.1}",
        base.core_vertices, base.base_rotation, base.hue_shift
    );
    let character = &layers.character;
    println!(
        "  skin {} hair {} eyes {}",
        character.skin_tone, character.hair_color, character.eye_color
    );
    for layer in layers.visible_equipment() {
        println!(
            "  {:<10} {} ({}, {:.0}%)",
            layer.slot.to_string(),
            layer.label,
            layer.genre,
            layer.intensity * 100.0
        );
    }
}
