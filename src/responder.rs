//! Canned replies to chat messages

use rand::Rng;

const SILENT_REPLY: &str = "Well, you're awfuly silent...";
// Greetings, small talk and goodbyes all get the same friendly answer
const HELLO_REPLY: &str = "Hello there!";
const HOW_ARE_YOU_REPLY: &str = HELLO_REPLY;
const BYE_REPLY: &str = HELLO_REPLY;
const FALLBACK_REPLIES: [&str; 3] = ["idk what you saying...", "What you saying?", "Huh?"];

/// Pick a reply for `input` using the thread-local rng.
pub fn get_response(input: &str) -> String {
    get_response_with(input, &mut rand::rng())
}

/// Pick a reply for `input`.  Triggers are checked in order and the first hit wins, so
/// "bye, roll dice" is a goodbye rather than a dice roll.
pub fn get_response_with<R: Rng + ?Sized>(input: &str, rng: &mut R) -> String {
    let lowered = input.to_lowercase();

    if lowered.is_empty() {
        SILENT_REPLY.to_owned()
    } else if lowered.contains("hello") {
        HELLO_REPLY.to_owned()
    } else if lowered.contains("how are you") {
        HOW_ARE_YOU_REPLY.to_owned()
    } else if lowered.contains("bye") {
        BYE_REPLY.to_owned()
    } else if lowered.contains("roll dice") {
        format!("You rolled: {}", rng.random_range(1..=6))
    } else {
        FALLBACK_REPLIES[rng.random_range(0..FALLBACK_REPLIES.len())].to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn empty_input_is_silent() {
        assert_eq!(
            get_response_with("", &mut rng()),
            "Well, you're awfuly silent..."
        );
    }

    #[test]
    fn hello_is_case_insensitive() {
        for input in ["hello", "HeLLo bot", "well hello there, how are you"] {
            assert_eq!(get_response_with(input, &mut rng()), HELLO_REPLY);
        }
    }

    #[test]
    fn small_talk_and_goodbyes() {
        for input in ["How are you?", "ok bye", "bye, how are you"] {
            assert_eq!(get_response_with(input, &mut rng()), "Hello there!");
        }
    }

    #[test]
    fn earlier_trigger_wins() {
        // "hello" is checked before "roll dice"
        assert_eq!(get_response_with("hello, roll dice", &mut rng()), HELLO_REPLY);
        // "bye" is checked before "roll dice"
        let reply = get_response_with("Bye bye, roll dice", &mut rng());
        assert_eq!(reply, BYE_REPLY);
        assert!(!reply.starts_with("You rolled: "));
    }

    #[test]
    fn dice_rolls_cover_one_through_six() {
        let mut rng = rng();
        let mut counts = [0usize; 6];
        for _ in 0..6000 {
            let reply = get_response_with("ROLL DICE please", &mut rng);
            let n: usize = reply
                .strip_prefix("You rolled: ")
                .and_then(|n| n.parse().ok())
                .unwrap();
            assert!((1..=6).contains(&n), "{reply}");
            counts[n - 1] += 1;
        }
        // Loose bound; expected 1000 each
        for count in counts {
            assert!((800..1200).contains(&count), "{counts:?}");
        }
    }

    #[test]
    fn unmatched_input_falls_back() {
        let mut rng = rng();
        for _ in 0..100 {
            let reply = get_response_with("what's the weather", &mut rng);
            assert!(FALLBACK_REPLIES.contains(&reply.as_str()), "{reply}");
        }
    }
}
