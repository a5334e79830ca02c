use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{ProgressMap, Status, StudyPlan, Topic, WeakTopics, ALL_SUBJECTS};

/// Picks up to `n` distinct rows at random, optionally restricted to one subject.
///
/// `None`, an empty subject or `"All"` means the whole catalog. Subject matching is exact and
/// case-sensitive; an unknown subject gives an empty result. Rows are drawn
/// without replacement and returned in random order.
pub fn recommend<R: Rng + ?Sized>(
    catalog: &Catalog,
    subject: Option<&str>,
    n: usize,
    rng: &mut R,
) -> Vec<Topic> {
    let mut pool: Vec<&Topic> = match subject {
        Some(s) if !s.is_empty() && s != ALL_SUBJECTS => {
            catalog.rows().iter().filter(|r| r.subject == s).collect()
        }
        _ => catalog.rows().iter().collect(),
    };

    if pool.is_empty() {
        debug!(?subject, "no topics match subject");
        return Vec::new();
    }

    let amount = n.min(pool.len());
    let (picked, _) = pool.partial_shuffle(rng, amount);
    debug!(?subject, requested = n, returned = picked.len(), "recommended topics");
    picked.iter().map(|t| (*t).clone()).collect()
}

/// Builds a plan of `days_left` days with `hours_per_day` topics each.
///
/// Topics are sampled from the whole catalog with replacement, so a topic can
/// repeat within a day. Callers must pass values of at least 1; zero just
/// produces empty days (or no days).
pub fn make_plan<R: Rng + ?Sized>(
    catalog: &Catalog,
    hours_per_day: u32,
    days_left: u32,
    rng: &mut R,
) -> StudyPlan {
    let rows = catalog.rows();
    let total = hours_per_day as usize * days_left as usize;

    let sampled: Vec<&str> = (0..total)
        .map(|_| rows[rng.gen_range(0..rows.len())].topic.as_str())
        .collect();

    let mut plan = StudyPlan::default();
    let per_day = hours_per_day as usize;
    for day in 1..=days_left {
        let start = (day as usize - 1) * per_day;
        let topics = sampled[start..start + per_day]
            .iter()
            .map(|t| t.to_string())
            .collect();
        plan.days.insert(day, topics);
    }

    debug!(hours_per_day, days_left, "generated study plan");
    plan
}

/// Topics currently marked weak, in progress order.
pub fn weak_topics(progress: &ProgressMap) -> WeakTopics {
    let weak: Vec<String> = progress
        .iter()
        .filter(|(_, status)| *status == Status::Weak)
        .map(|(topic, _)| topic.to_string())
        .collect();

    if weak.is_empty() {
        WeakTopics::AllGood
    } else {
        WeakTopics::Topics(weak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    mod recommend_tests {
        use super::*;

        #[test]
        fn returns_n_distinct_rows_from_catalog() {
            let catalog = Catalog::fallback();
            for seed in 0..20 {
                let recs = recommend(&catalog, None, 4, &mut rng(seed));
                assert_eq!(recs.len(), 4);

                let names: HashSet<&str> = recs.iter().map(|r| r.topic.as_str()).collect();
                assert_eq!(names.len(), 4);
                assert!(recs.iter().all(|r| catalog.rows().contains(r)));
            }
        }

        #[test]
        fn all_sentinel_means_no_filter() {
            let catalog = Catalog::fallback();
            let recs = recommend(&catalog, Some("All"), 6, &mut rng(7));
            assert_eq!(recs.len(), 6);
        }

        #[test]
        fn empty_subject_means_no_filter() {
            let catalog = Catalog::fallback();
            let recs = recommend(&catalog, Some(""), 3, &mut rng(0));
            assert_eq!(recs.len(), 3);
        }

        #[test]
        fn clamps_to_pool_size() {
            let catalog = Catalog::fallback();
            let recs = recommend(&catalog, None, 50, &mut rng(1));
            assert_eq!(recs.len(), catalog.len());
        }

        #[test]
        fn math_with_five_returns_both_math_rows() {
            let catalog = Catalog::fallback();
            let recs = recommend(&catalog, Some("Math"), 5, &mut rng(3));

            let mut names: Vec<&str> = recs.iter().map(|r| r.topic.as_str()).collect();
            names.sort();
            assert_eq!(names, vec!["Algebra", "Trigonometry"]);
        }

        #[test]
        fn subject_filter_below_pool_size() {
            let catalog = Catalog::fallback();
            for seed in 0..20 {
                let recs = recommend(&catalog, Some("Science"), 1, &mut rng(seed));
                assert_eq!(recs.len(), 1);
                assert!(recs.iter().all(|r| r.subject == "Science"));
            }
        }

        #[test]
        fn filter_is_case_sensitive() {
            let catalog = Catalog::fallback();
            assert!(recommend(&catalog, Some("math"), 3, &mut rng(0)).is_empty());
        }

        #[test]
        fn unknown_subject_is_empty() {
            let catalog = Catalog::fallback();
            assert!(recommend(&catalog, Some("Geography"), 3, &mut rng(0)).is_empty());
        }

        #[test]
        fn zero_count_is_empty() {
            let catalog = Catalog::fallback();
            assert!(recommend(&catalog, None, 0, &mut rng(0)).is_empty());
        }

        #[test]
        fn same_seed_same_result() {
            let catalog = Catalog::fallback();
            let a = recommend(&catalog, None, 3, &mut rng(42));
            let b = recommend(&catalog, None, 3, &mut rng(42));
            assert_eq!(a, b);
        }

        #[test]
        fn order_varies_across_draws() {
            let catalog = Catalog::fallback();
            let mut rng = rng(9);
            let firsts: HashSet<String> = (0..50)
                .map(|_| recommend(&catalog, None, 6, &mut rng)[0].topic.clone())
                .collect();
            assert!(firsts.len() > 1);
        }

        #[test]
        fn duplicate_names_across_subjects_are_separate_rows() {
            let catalog = Catalog::new(vec![
                Topic::new("Math", "Proofs", Difficulty::Hard),
                Topic::new("Logic", "Proofs", Difficulty::Medium),
            ])
            .unwrap();
            let recs = recommend(&catalog, None, 2, &mut rng(5));
            let subjects: HashSet<&str> = recs.iter().map(|r| r.subject.as_str()).collect();
            assert_eq!(subjects.len(), 2);
        }
    }

    mod make_plan_tests {
        use super::*;

        #[test]
        fn two_hours_three_days() {
            let catalog = Catalog::fallback();
            let plan = make_plan(&catalog, 2, 3, &mut rng(11));

            let days: Vec<u32> = plan.days.keys().copied().collect();
            assert_eq!(days, vec![1, 2, 3]);

            let names = catalog.topic_names();
            for (_, topics) in plan.iter() {
                assert_eq!(topics.len(), 2);
                assert!(topics.iter().all(|t| names.contains(t)));
            }
        }

        #[test]
        fn shape_holds_for_many_sizes() {
            let catalog = Catalog::fallback();
            let mut rng = rng(2);
            for hours in 1..=6 {
                for days in [1, 2, 7, 60] {
                    let plan = make_plan(&catalog, hours, days, &mut rng);
                    assert_eq!(plan.len(), days as usize);
                    assert!(plan.iter().all(|(_, t)| t.len() == hours as usize));
                    assert_eq!(plan.days.keys().last().copied(), Some(days));
                }
            }
        }

        #[test]
        fn samples_with_replacement() {
            // One-row catalog forces repeats within a day.
            let catalog = Catalog::new(vec![Topic::new("Math", "Algebra", Difficulty::Easy)]).unwrap();
            let plan = make_plan(&catalog, 4, 2, &mut rng(0));
            assert_eq!(plan.days[&1], vec!["Algebra", "Algebra", "Algebra", "Algebra"]);
            assert_eq!(plan.days[&2].len(), 4);
        }

        #[test]
        fn can_exceed_catalog_size() {
            let catalog = Catalog::fallback();
            let plan = make_plan(&catalog, 6, 60, &mut rng(8));
            let total: usize = plan.iter().map(|(_, t)| t.len()).sum();
            assert_eq!(total, 360);
        }

        #[test]
        fn zero_days_is_empty_plan() {
            let catalog = Catalog::fallback();
            assert!(make_plan(&catalog, 2, 0, &mut rng(0)).is_empty());
        }

        #[test]
        fn same_seed_same_plan() {
            let catalog = Catalog::fallback();
            let a = make_plan(&catalog, 3, 4, &mut rng(99));
            let b = make_plan(&catalog, 3, 4, &mut rng(99));
            assert_eq!(a, b);
        }
    }

    mod weak_topics_tests {
        use super::*;

        #[test]
        fn empty_progress_is_all_good() {
            assert_eq!(weak_topics(&ProgressMap::new()), WeakTopics::AllGood);
        }

        #[test]
        fn no_weak_is_all_good() {
            let mut progress = ProgressMap::new();
            progress.set("Algebra", Status::Ok);
            progress.set("Physics", Status::Good);
            assert!(weak_topics(&progress).is_all_good());
        }

        #[test]
        fn weak_in_insertion_order() {
            let mut progress = ProgressMap::new();
            progress.set("Algebra", Status::Weak);
            progress.set("Grammar", Status::Good);
            progress.set("Physics", Status::Weak);

            assert_eq!(
                weak_topics(&progress),
                WeakTopics::Topics(vec!["Algebra".to_string(), "Physics".to_string()])
            );
        }

        #[test]
        fn marking_good_removes_from_weak() {
            let mut progress = ProgressMap::new();
            progress.set("Algebra", Status::Weak);
            progress.set("Physics", Status::Weak);
            progress.set("Algebra", Status::Good);

            assert_eq!(
                weak_topics(&progress),
                WeakTopics::Topics(vec!["Physics".to_string()])
            );
        }

        #[test]
        fn non_catalog_topics_are_accepted() {
            let mut progress = ProgressMap::new();
            progress.set("Underwater Basket Weaving", Status::Weak);
            assert_eq!(
                weak_topics(&progress).as_list(),
                vec!["Underwater Basket Weaving"]
            );
        }
    }
}
