//! Built-in demo roster for the `demo` subcommand.

use lineup_core::{Eligibility, Player, Position};

fn infield_outfield() -> Eligibility {
    Eligibility::positions(&[
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ])
}

fn outfield_only() -> Eligibility {
    Eligibility::positions(&[Position::LeftField, Position::CenterField, Position::RightField])
}

/// Eleven players with a realistic spread of skills: four can pitch, three
/// can catch, two are outfield-only, and one arrives late (innings 3-6).
pub fn demo_roster() -> Vec<Player> {
    let mut with_pitching = infield_outfield();
    with_pitching.pitcher = true;
    let mut battery = Eligibility::all();
    battery.shortstop = false;

    vec![
        Player::new("Maya", "Okafor", Some(7), with_pitching),
        Player::new("Tess", "Calloway", Some(12), battery),
        Player::new("June", "Arakawa", Some(15), Eligibility::all()),
        Player::new("Priya", "Bhatt", Some(3), infield_outfield()),
        Player::new("Sloane", "Ferris", Some(8), outfield_only()),
        Player::new("Carmen", "Delgado", Some(21), infield_outfield()),
        Player::new("Wren", "Hollis", Some(5), {
            let mut eligible = infield_outfield();
            eligible.catcher = true;
            eligible
        }),
        Player::new("Dana", "Kowalski", Some(18), infield_outfield()),
        Player::new("Ines", "Moreau", Some(2), outfield_only()),
        Player::new("Bex", "Tanaka", Some(11), infield_outfield()).with_availability(3, 6),
        Player::new("Ro", "Fontaine", Some(9), {
            let mut eligible = infield_outfield();
            eligible.pitcher = true;
            eligible
        }),
    ]
}
