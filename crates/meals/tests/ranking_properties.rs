//! Property tests for ranking and scoring invariants.

use mealfinder_meals::{
    FitnessGoal, GoalMatcher, MealCandidate, MealScorer, NutritionEstimate, NutritionRuleSet,
    Preferences, RankingPipeline, WeightedScorer,
};
use proptest::prelude::*;

const INGREDIENTS: &[&str] = &["peanut", "shrimp", "chicken", "tofu", "cheese", "rice"];
const CUISINES: &[&str] = &["Thai", "Mexican", "American", "Korean"];

fn goal_strategy() -> impl Strategy<Value = FitnessGoal> {
    prop::sample::select(FitnessGoal::ALL.to_vec())
}

fn nutrition_strategy() -> impl Strategy<Value = Option<NutritionEstimate>> {
    prop::option::of(
        (0.0..2500.0f64, 0.0..150.0f64, 0.0..250.0f64, 0.0..120.0f64)
            .prop_map(|(c, p, cb, f)| NutritionEstimate::new(c, p, cb, f)),
    )
}

fn candidate_strategy() -> impl Strategy<Value = MealCandidate> {
    (
        "[A-Z][a-z]{2,10}",
        prop::sample::subsequence(INGREDIENTS.to_vec(), 0..3),
        prop::option::of(prop::sample::select(CUISINES.to_vec())),
        nutrition_strategy(),
        prop::option::of(0.0..10.0f64),
    )
        .prop_map(|(dish, ingredients, cuisine, nutrition, distance)| {
            let mut meal = MealCandidate::new("Test Kitchen", dish)
                .with_description(format!("Made with {}", ingredients.join(", ")));
            meal.cuisine = cuisine.map(str::to_string);
            meal.nutrition = nutrition;
            meal.distance_miles = distance;
            meal
        })
}

fn preferences_strategy() -> impl Strategy<Value = Preferences> {
    (
        prop::sample::subsequence(INGREDIENTS.to_vec(), 0..2),
        prop::option::of(prop::sample::select(CUISINES.to_vec())),
    )
        .prop_map(|(excluded, cuisine)| {
            let mut prefs = Preferences::new();
            for term in excluded {
                prefs = prefs.exclude(term);
            }
            prefs.cuisine = cuisine.map(str::to_string);
            prefs
        })
}

proptest! {
    #[test]
    fn output_bounded_sorted_and_clean(
        meals in prop::collection::vec(candidate_strategy(), 0..30),
        goal in goal_strategy(),
        prefs in preferences_strategy(),
        limit in 1usize..15,
    ) {
        let ranked = RankingPipeline::default().rank(&meals, goal, &prefs, limit).unwrap();

        let survivors = meals.iter().filter(|m| !prefs.excludes(m)).count();
        prop_assert!(ranked.len() <= limit.min(survivors));
        prop_assert_eq!(ranked.len(), limit.min(survivors));

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        for meal in &ranked {
            prop_assert!((0.0..=1.0).contains(&meal.relevance_score));
            prop_assert_eq!(meal.matched_goal, goal);
            prop_assert!(!prefs.excludes(&meal.candidate));
        }
    }

    #[test]
    fn score_is_deterministic(
        meal in candidate_strategy(),
        goal in goal_strategy(),
        prefs in preferences_strategy(),
    ) {
        let scorer = WeightedScorer::default();
        let rule = NutritionRuleSet::standard().rules_for(goal);
        let first = scorer.score(&meal, goal, rule, &prefs);
        prop_assert_eq!(first, scorer.score(&meal, goal, rule, &prefs));
    }

    #[test]
    fn missing_nutrition_strictly_below_full_fit(goal in goal_strategy()) {
        let scorer = WeightedScorer::default();
        let rule = NutritionRuleSet::standard().rules_for(goal);
        let unknown = scorer.breakdown(&MealCandidate::new("a", "b"), rule, &Preferences::new());
        prop_assert!(unknown.nutrition_fit > 0.0);
        prop_assert!(unknown.nutrition_fit < 1.0);
    }

    #[test]
    fn matcher_never_panics_on_text(input in "\\PC{1,40}") {
        let result = GoalMatcher::new().match_goal(&input);
        if input.trim().is_empty() {
            prop_assert!(result.is_err());
        } else {
            let result = result.unwrap();
            prop_assert!(result.confidence <= 100);
            prop_assert_eq!(result.suggestions.len(), FitnessGoal::ALL.len() - 1);
        }
    }

    #[test]
    fn single_typo_in_synonym_still_resolves(
        goal in goal_strategy(),
        pick in any::<prop::sample::Index>(),
        pos in any::<prop::sample::Index>(),
        delete in any::<bool>(),
    ) {
        let phrase = pick.get(goal.synonyms());
        let mut chars: Vec<char> = phrase.chars().collect();
        let at = pos.index(chars.len());
        if delete {
            chars.remove(at);
        } else {
            prop_assume!(chars[at] != ' ');
            chars[at] = if chars[at] == 'x' { 'q' } else { 'x' };
        }
        let typo: String = chars.into_iter().collect();

        let result = GoalMatcher::new().match_goal(&typo).unwrap();
        prop_assert_eq!(result.matched_goal, goal, "{} -> {:?}", typo, result);
        if phrase.len() >= 8 {
            prop_assert!(result.confidence >= 80, "{} -> {:?}", typo, result);
        }
    }
}
