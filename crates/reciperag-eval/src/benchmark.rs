//! Fixed benchmark query sets. Keep them constant across comparisons.

use serde::Serialize;

use reciperag_core::types::Query;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Benchmark {
    /// Short retrieval-style queries, including noisy and Russian phrasings.
    #[default]
    Retrieval,
    /// Longer queries phrased around meal planning constraints.
    Planning,
    /// Both sets, retrieval first.
    All,
}

impl Benchmark {
    pub fn queries(self) -> Vec<Query> {
        match self {
            Benchmark::Retrieval => retrieval_queries(),
            Benchmark::Planning => planning_queries(),
            Benchmark::All => {
                let mut all = retrieval_queries();
                all.extend(planning_queries());
                all
            }
        }
    }
}

pub fn retrieval_queries() -> Vec<Query> {
    vec![
        // pasta disambiguation: r1 vs r2
        Query::new("I have pasta and garlic. What should I cook for two?", &["r1"]),
        Query::new("Creamy pasta with mushrooms—how do I make it?", &["r2"]),
        Query::new("What pasta recipe uses butter and onion?", &["r2"]),
        Query::new("Tomato pasta—what do I add after draining?", &["r1"]),
        Query::new("How do I know chicken is fully cooked? What temperature?", &["r3"]),
        Query::new("Bake fish with lemon—what temperature and time?", &["r4"]),
        // keyword style
        Query::new("soy sauce sesame oil stir fry", &["r5"]),
        Query::new("kidney beans ground beef spices", &["r6"]),
        Query::new("romaine croutons parmesan chicken", &["r7"]),
        Query::new("quick chocolate cake in a cup microwave time", &["r9"]),
        Query::new("banana breakfast batter flip when bubbles", &["r10"]),
        Query::new("overnight oats: how many hours?", &["r8"]),
        // typos and other languages
        Query::new("tomato pasta garlic time simmer", &["r1"]),
        Query::new("tommato spageti garlic simer how long", &["r1"]),
        Query::new("сколько минут тушить томаты для пасты?", &["r1"]),
        Query::new("cream mushroom pasta how much cream", &["r2"]),
        Query::new("cremy mushrom pasta cream ml?", &["r2"]),
        Query::new("сколько сливок в пасте с грибами?", &["r2"]),
        Query::new("mug cake microwave seconds", &["r9"]),
        Query::new("choc mug cake microwvave 45 or 60 sec", &["r9"]),
        Query::new("сколько секунд готовить кекс в кружке?", &["r9"]),
        Query::new(
            "Quick beef chili: after adding tomatoes and beans, exactly how many minutes should it simmer?",
            &["r6"],
        ),
        Query::new("Overnight oats: what is the minimum chill time in hours?", &["r8"]),
    ]
}

pub fn planning_queries() -> Vec<Query> {
    vec![
        Query::new(
            "For a healthy family breakfast, how long should overnight oats chill?",
            &["r8"],
        ),
        Query::new("Low-sugar breakfast: what are the exact amounts for overnight oats?", &["r8"]),
        Query::new(
            "Breakfast for kids: how long do I cook banana pancakes on each side?",
            &["r10"],
        ),
        Query::new("What ingredients do I need for banana pancakes, with quantities?", &["r10"]),
        Query::new(
            "Chicken night (only once this week): what internal temperature should chicken thighs reach?",
            &["r3"],
        ),
        Query::new("Chicken thighs: how long do I sear skin-side down?", &["r3"]),
        Query::new(
            "Fish night (only once this week): what oven temperature do I bake salmon at?",
            &["r4"],
        ),
        Query::new("How many minutes do I bake salmon fillets in the oven?", &["r4"]),
        Query::new("Meat-based dinner: what spices are in the quick beef chili?", &["r6"]),
        Query::new("Quick beef chili: how long should it simmer after adding beans?", &["r6"]),
        Query::new(
            "Weeknight pasta: how long should I simmer tomatoes for simple tomato spaghetti?",
            &["r1"],
        ),
        Query::new("Creamy mushroom pasta: how many ml of cream does it use?", &["r2"]),
        Query::new(
            "Vegetable stir-fry: how long do I stir-fry the vegetables before adding soy sauce?",
            &["r5"],
        ),
        // several near-duplicate recipes are acceptable answers
        Query::new(
            "Tomato garlic pasta: how many minutes do I simmer the tomatoes?",
            &["r1", "r12", "r35", "r36", "r37"],
        ),
        Query::new(
            "Chocolate mug cake: should I microwave 45 seconds or 60 seconds?",
            &["r9", "r46", "r47", "r48"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_sizes_are_fixed() {
        assert_eq!(Benchmark::Retrieval.queries().len(), 23);
        assert_eq!(Benchmark::Planning.queries().len(), 15);
        assert_eq!(Benchmark::All.queries().len(), 38);
    }

    #[test]
    fn every_query_has_an_expected_id() {
        assert!(Benchmark::All.queries().iter().all(|q| !q.expected.is_empty()));
        let mug = &Benchmark::Planning.queries()[14];
        assert_eq!(mug.expected.len(), 4);
        assert!(mug.expected.contains("r47"));
    }
}
