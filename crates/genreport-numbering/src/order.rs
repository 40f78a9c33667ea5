//! The single ordering used for every "oldest first, then alphabetical" decision.

use std::cmp::Ordering;

use genreport_common::{FamilyGraph, Person, PersonIdx};

/// Birth year ascending with unknown years last, then name, then xref.
///
/// Names compare byte-wise. The xref tie-break only matters for namesakes born
/// the same year and keeps the order total.
pub fn compare_persons(a: &Person, b: &Person) -> Ordering {
    compare_birth_years(a.birth_year, b.birth_year)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.xref.cmp(&b.xref))
}

#[inline]
pub fn compare_birth_years(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Index-level wrapper over [`compare_persons`].
pub fn compare_indices(graph: &FamilyGraph, a: PersonIdx, b: PersonIdx) -> Ordering {
    compare_persons(graph.person(a), graph.person(b))
}

/// Sort `people` in place, oldest first.
pub fn sort_people(graph: &FamilyGraph, people: &mut [PersonIdx]) {
    people.sort_by(|&a, &b| compare_indices(graph, a, b));
}

/// Sort by `generation` first, then by [`compare_persons`] within each generation.
pub fn sort_by_generation<F>(graph: &FamilyGraph, people: &mut [PersonIdx], generation: F)
where
    F: Fn(PersonIdx) -> u32,
{
    people.sort_by(|&a, &b| {
        generation(a)
            .cmp(&generation(b))
            .then_with(|| compare_indices(graph, a, b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, year: Option<i32>) -> Person {
        let mut person = Person::new(format!("@{name}@"), name);
        person.birth_year = year;
        person
    }

    #[test]
    fn known_years_sort_before_unknown() {
        assert_eq!(
            compare_persons(&p("Zed", Some(1990)), &p("Adam", None)),
            Ordering::Less
        );
        assert_eq!(
            compare_persons(&p("Adam", None), &p("Zed", Some(1990))),
            Ordering::Greater
        );
    }

    #[test]
    fn equal_years_fall_back_to_name() {
        assert_eq!(
            compare_persons(&p("Berit", Some(1900)), &p("Anna", Some(1900))),
            Ordering::Greater
        );
        assert_eq!(
            compare_persons(&p("Anna", None), &p("Berit", None)),
            Ordering::Less
        );
    }

    #[test]
    fn name_comparison_is_bytewise() {
        // Uppercase sorts before lowercase.
        assert_eq!(
            compare_persons(&p("Zed", Some(1)), &p("adam", Some(1))),
            Ordering::Less
        );
    }

    #[test]
    fn namesakes_are_still_totally_ordered() {
        let a = Person::new("@I1@", "Anna").with_birth_year(1900);
        let b = Person::new("@I2@", "Anna").with_birth_year(1900);
        assert_eq!(compare_persons(&a, &b), Ordering::Less);
        assert_eq!(compare_persons(&a, &a), Ordering::Equal);
    }
}
