//! Canned replies used when the completion service is unavailable.
//!
//! Templates use `{name}` and `{direction}` placeholders filled from the
//! matched location. Selection goes through a [`RandomSource`] so callers and
//! tests control which line is returned.

use super::location::Location;
use super::ports::RandomSource;

/// Reply for location questions that name no known place.
pub const LOCATION_INTENT_REPLY: &str = "I know this campus like the back of my hand! Try asking about the canteen (for those hunger emergencies), library (where dreams and deadlines meet), auditorium (our very own Broadway), sports complex (where future engineers turn into athletes), or admin block (the command center)!";

/// Reply for greetings.
pub const GREETING_REPLY: &str = "Hey there, campus explorer! 👋 I'm your friendly neighborhood guide, ready to help you navigate through our awesome campus. Where would you like to go today?";

/// Template used for locations without a dedicated bank entry.
pub const GENERIC_LOCATION_TEMPLATE: &str =
    "The {name} is located in the {direction} part of the campus. Let me show you the way! 🎯";

/// Replies for open conversation when no completion is available.
pub const CONVERSATION_FALLBACKS: [&str; 3] = [
    "I'm your campus navigation buddy! Try asking me things like 'Where's the canteen?' or 'How do I get to the library?' I promise to keep you entertained while showing you around! 🎯",
    "Campus directions are my superpower! Ask me where to find the auditorium, the sports complex, or the admin block and I'll put it on the map for you. 🗺️",
    "My witty brain is taking a quick coffee break, but I still know every corner of this campus. Name a building and I'll point you the right way! 🧭",
];

const CANTEEN: &[&str] = &[
    "Hungry? The {name} is your oasis in the {direction} part of campus! Follow your nose (and our map) to find the best campus food. 🍽️",
    "Ah, the {name}! Located in the {direction} area, it's where great minds go to refuel. Just don't blame us if you spend your entire scholarship on samosas! 🥘",
];

const LIBRARY: &[&str] = &[
    "The {name} awaits in the {direction} section - where silence is golden and knowledge is platinum! Don't forget to bring your reading glasses (and maybe a coffee). 📚",
    "Looking for a quiet escape? The {name} in the {direction} zone is your sanctuary. Just remember: snoring while studying is frowned upon! 🤓",
];

const AUDITORIUM: &[&str] = &[
    "Lights, camera, action! The {name} stands proudly in the {direction} area. It's where stars are born (or at least where they give presentations). 🎭",
    "Head to the {direction} side to find our magnificent {name}. It's like Broadway, but with more engineering presentations! 🎬",
];

const SPORTS_COMPLEX: &[&str] = &[
    "Game on! The {name} is pumping with energy in the {direction} zone. Where future engineers prove they're not just good with computers! 🏃‍♂️",
    "Need to burn off those canteen samosas? The {name} in the {direction} area is your fitness paradise! 🏋️‍♀️",
];

const ADMIN_BLOCK: &[&str] = &[
    "The {name} holds court in the {direction} part of campus. It's where all the magic (and paperwork) happens! ✨",
    "Looking for the big bosses? They're in the {name}, {direction} area. Don't worry, they don't bite... usually! 😉",
];

/// Bank entries for a location id, if it has any.
pub fn bank_for(id: &str) -> Option<&'static [&'static str]> {
    match id {
        "canteen" => Some(CANTEEN),
        "library" => Some(LIBRARY),
        "auditorium" => Some(AUDITORIUM),
        "sports-complex" => Some(SPORTS_COMPLEX),
        "admin-block" => Some(ADMIN_BLOCK),
        _ => None,
    }
}

fn render(template: &str, location: &Location) -> String {
    template
        .replace("{name}", location.name())
        .replace("{direction}", location.direction().as_str())
}

fn choose<'a>(options: &[&'a str], random: &dyn RandomSource) -> &'a str {
    let index = random.pick(options.len()).min(options.len() - 1);
    options[index]
}

/// Pick and render a canned line for `location`.
pub fn fallback_line(location: &Location, random: &dyn RandomSource) -> String {
    let template = match bank_for(location.id().as_str()) {
        Some(options) => choose(options, random),
        None => GENERIC_LOCATION_TEMPLATE,
    };
    render(template, location)
}

/// Pick a canned reply for open conversation.
pub fn conversation_fallback(random: &dyn RandomSource) -> String {
    choose(&CONVERSATION_FALLBACKS, random).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixedRandomSource, MockRandomSource};
    use crate::domain::{CampusSeed, Direction, LocationId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn seed() -> CampusSeed {
        CampusSeed::builtin().expect("seed is valid")
    }

    fn seeded(seed: &CampusSeed, id: &str) -> Location {
        seed.locations
            .iter()
            .find(|l| l.id().as_str() == id)
            .cloned()
            .expect("seeded location")
    }

    #[rstest]
    fn every_seeded_location_has_a_bank(seed: CampusSeed) {
        for location in &seed.locations {
            let bank = bank_for(location.id().as_str()).expect("bank entry");
            assert!(!bank.is_empty());
        }
    }

    #[rstest]
    #[case(0, "Hungry? The Canteen is your oasis in the northern part of campus!")]
    #[case(1, "Ah, the Canteen! Located in the northern area")]
    fn canteen_lines_follow_random_index(
        seed: CampusSeed,
        #[case] index: usize,
        #[case] prefix: &str,
    ) {
        let line = fallback_line(&seeded(&seed, "canteen"), &FixedRandomSource(index));
        assert!(line.starts_with(prefix), "unexpected line: {line}");
    }

    #[rstest]
    fn rendered_lines_have_no_placeholders(seed: CampusSeed) {
        for location in &seed.locations {
            for index in 0..2 {
                let line = fallback_line(location, &FixedRandomSource(index));
                assert!(!line.contains('{'), "unfilled template: {line}");
                assert!(line.contains(location.direction().as_str()));
            }
        }
    }

    #[rstest]
    fn unknown_location_uses_generic_template() {
        let gate = Location::new(
            LocationId::new("main-gate").expect("valid slug"),
            "Main Gate",
            21.0,
            79.0,
            Direction::Southwestern,
        )
        .expect("valid location");
        let mut random = MockRandomSource::new();
        random.expect_pick().never();

        let line = fallback_line(&gate, &random);

        assert_eq!(
            line,
            "The Main Gate is located in the southwestern part of the campus. Let me show you the way! 🎯"
        );
    }

    #[rstest]
    fn conversation_pool_is_indexed_by_random_source() {
        let mut random = MockRandomSource::new();
        random.expect_pick().withf(|len| *len == 3).return_const(2_usize);

        assert_eq!(conversation_fallback(&random), CONVERSATION_FALLBACKS[2]);
    }

    #[rstest]
    fn out_of_range_picks_are_clamped() {
        let mut random = MockRandomSource::new();
        random.expect_pick().return_const(42_usize);

        assert_eq!(conversation_fallback(&random), CONVERSATION_FALLBACKS[2]);
    }
}
