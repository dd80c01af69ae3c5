//! The fixed question catalog, rating options and subscale definitions.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use cars_core::models::subscale::SubscaleKey;

/// Number of questions in the instrument.
pub const QUESTION_COUNT: usize = 25;

/// Id of the self-harm item. Scored separately, never summed.
pub const SELF_HARM_ITEM_ID: u32 = 25;

/// Highest answer value for a regular (Likert) item.
pub const MAX_RATING: i32 = 4;

/// Language a question prompt can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Language {
    #[default]
    English,
    Filipino,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    /// Stable ordinal, 1..=25.
    pub id: u32,
    pub prompt: String,
    pub translation: String,
    pub is_special: bool,
}

impl Question {
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::English => &self.prompt,
            Language::Filipino => &self.translation,
        }
    }

    /// Inclusive range of answer values this item accepts.
    pub fn allowed_range(&self) -> (i32, i32) {
        if self.is_special { (0, 1) } else { (0, MAX_RATING) }
    }
}

/// A labelled answer choice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatingOption {
    pub label: String,
    pub value: i32,
}

/// A named group of items whose answers are summed into one raw score.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscale {
    pub key: SubscaleKey,
    pub label: String,
    /// Question ids (1-based), in order.
    pub items: Vec<u32>,
}

/// The 25 questions, in order.
pub fn questions() -> &'static [Question] {
    static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
        let items = [
            ("I complain a lot.", "Sobrang akong nagrereklamo."),
            ("I feel sad and/or unhappy.", "Nalulungkot ako."),
            ("I find it difficult to accept defeat.", "Hirap ako tumanggap ng pagkatalo."),
            ("I am not interested in studying.", "Hindi ako interesadong mag-aral."),
            ("I disobey adults.", "Di ko sinusunod ang mga nakakatanda."),
            ("My mood changes easily.", "Madaling magbago ang aking mood."),
            (
                "I blame others for my mistakes.",
                "Sinisisi ko ang iba dahil sa aking mga pagkakamali.",
            ),
            (
                "I do not participate in class activities.",
                "Ayaw kong sumali sa mga gawain sa klase.",
            ),
            ("I am noisy.", "Maingay ako."),
            ("I am easily frustrated or disappointed.", "Madali akong mainis o madismaya."),
            (
                "I do not share my things.",
                "Hindi ako nagbibigay o nagbabahagi ng gamit sa iba.",
            ),
            ("I do not attend classes regularly.", "Di ako pumapasok nang regular sa klase."),
            ("I have short attention span.", "Maikli ang aking atensyon."),
            ("I lack self confidence.", "Kulang ang kumpyansa ko sa aking sarili."),
            (
                "I find it difficult to maintain friendships.",
                "Nahihirapan akong panatiliin ang aking mga kaibigan.",
            ),
            (
                "I find it hard to understand the lessons.",
                "Nahihirapan akong intindihin ang mga aralin.",
            ),
            ("I am easily distracted.", "Madali akong mawala sa focus."),
            ("I worry about a lot of things.", "Nag-aalala ako sa maraming bagay."),
            (
                "I find it hard to make positive comments.",
                "Nahihirapan akong magbigay ng mga positibong kumento.",
            ),
            (
                "I come to school unprepared for the lessons.",
                "Pumapasok ako sa klase na hindi handa para sa mga aralin.",
            ),
            ("I have trouble concentrating.", "Nahihirapan akong mag-concentrate."),
            ("I find it hard to relax/calm down.", "Nahihirapan akong mag-relax at kumalma."),
            (
                "I refuse others requests for help.",
                "Tumatanggi akong magbigay ng tulong sa mga taong humihingi nito.",
            ),
            (
                "I don't finish my class assignment on time.",
                "Hindi ko natatapos ang aking mga seatwork sa nakatakdang oras.",
            ),
            (
                "In the past month, I had thoughts of hurting myself.",
                "Sa nakaraang buwan, naisip kong saktan ang sarili ko.",
            ),
        ];

        items
            .iter()
            .zip(1u32..)
            .map(|((prompt, translation), id)| Question {
                id,
                prompt: prompt.to_string(),
                translation: translation.to_string(),
                is_special: id == SELF_HARM_ITEM_ID,
            })
            .collect()
    });
    &QUESTIONS
}

/// Look up a question by its 1-based id.
pub fn question(id: u32) -> Option<&'static Question> {
    questions().iter().find(|q| q.id == id)
}

/// Answer choices for the regular items.
pub fn rating_options() -> &'static [RatingOption] {
    static OPTIONS: LazyLock<Vec<RatingOption>> = LazyLock::new(|| {
        ["Never", "Rarely", "Occasionally", "Often", "Almost Always"]
            .iter()
            .zip(0..)
            .map(|(name, value)| RatingOption {
                label: format!("{name} ({value})"),
                value,
            })
            .collect()
    });
    &OPTIONS
}

/// Answer choices for the self-harm item.
pub fn special_options() -> &'static [RatingOption] {
    static OPTIONS: LazyLock<Vec<RatingOption>> = LazyLock::new(|| {
        vec![
            RatingOption {
                label: "No".to_string(),
                value: 0,
            },
            RatingOption {
                label: "Yes".to_string(),
                value: 1,
            },
        ]
    });
    &OPTIONS
}

/// The shipped subscale definitions. The four named subscales partition
/// items 1–24 into interleaved groups of six; `total` spans all 24.
pub fn subscales() -> &'static [Subscale] {
    static SUBSCALES: LazyLock<Vec<Subscale>> = LazyLock::new(|| {
        // Item n belongs to the (n - 1) % 4 th part.
        let part = |offset: u32| (0..6).map(|i| offset + 1 + 4 * i).collect::<Vec<_>>();

        let mut subscales: Vec<Subscale> = SubscaleKey::PARTS
            .iter()
            .zip(0u32..)
            .map(|(key, offset)| Subscale {
                key: *key,
                label: key.label().to_string(),
                items: part(offset),
            })
            .collect();

        subscales.push(Subscale {
            key: SubscaleKey::Total,
            label: SubscaleKey::Total.label().to_string(),
            items: (1..SELF_HARM_ITEM_ID).collect(),
        });
        subscales
    });
    &SUBSCALES
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_has_one_special_item_at_the_end() {
        let qs = questions();
        assert_eq!(qs.len(), QUESTION_COUNT);
        let special: Vec<_> = qs.iter().filter(|q| q.is_special).map(|q| q.id).collect();
        assert_eq!(special, vec![SELF_HARM_ITEM_ID]);
        assert!(qs.iter().zip(1u32..).all(|(q, id)| q.id == id));
    }

    #[test]
    fn named_subscales_match_the_published_item_groups() {
        let items = |key| {
            subscales()
                .iter()
                .find(|s| s.key == key)
                .map(|s| s.items.clone())
                .unwrap()
        };
        assert_eq!(items(SubscaleKey::Externalizing), vec![1, 5, 9, 13, 17, 21]);
        assert_eq!(items(SubscaleKey::Internalizing), vec![2, 6, 10, 14, 18, 22]);
        assert_eq!(items(SubscaleKey::Social), vec![3, 7, 11, 15, 19, 23]);
        assert_eq!(items(SubscaleKey::Academic), vec![4, 8, 12, 16, 20, 24]);
    }

    #[test]
    fn parts_are_disjoint_and_cover_total() {
        let mut seen = BTreeSet::new();
        for s in subscales().iter().filter(|s| s.key != SubscaleKey::Total) {
            for item in &s.items {
                assert!(seen.insert(*item), "item {item} is in two subscales");
            }
        }
        let total: BTreeSet<_> = subscales()
            .iter()
            .find(|s| s.key == SubscaleKey::Total)
            .unwrap()
            .items
            .iter()
            .copied()
            .collect();
        assert_eq!(seen, total);
        assert!(!total.contains(&SELF_HARM_ITEM_ID));
    }

    #[test]
    fn rating_labels_carry_their_value() {
        let labels: Vec<_> = rating_options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels[0], "Never (0)");
        assert_eq!(labels[4], "Almost Always (4)");
        assert_eq!(question(25).unwrap().allowed_range(), (0, 1));
        assert_eq!(question(1).unwrap().allowed_range(), (0, 4));
    }
}
