//! Common test helpers
use genreport_common::{Family, FamilyGraph, FamilyGraphBuilder, Person, PersonIdx};

/// Small builder for hand-drawn family trees.
pub struct Tree {
    builder: FamilyGraphBuilder,
    families: usize,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            builder: FamilyGraph::builder(),
            families: 0,
        }
    }

    /// Add `@I{n}@` with the given name and birth year.
    pub fn person(&mut self, n: u32, name: &str, born: Option<i32>) -> PersonIdx {
        let mut person = Person::new(format!("@I{n}@"), name);
        person.birth_year = born;
        self.builder.add_person(person).unwrap()
    }

    pub fn family(
        &mut self,
        husband: Option<PersonIdx>,
        wife: Option<PersonIdx>,
        children: &[PersonIdx],
    ) -> usize {
        self.families += 1;
        let mut family = Family::new(format!("@F{}@", self.families));
        family.husband = husband;
        family.wife = wife;
        family.children = children.to_vec();
        self.builder.add_family(family).unwrap()
    }

    pub fn couple(&mut self, husband: PersonIdx, wife: PersonIdx, children: &[PersonIdx]) -> usize {
        self.family(Some(husband), Some(wife), children)
    }

    /// Make `family` the one whose partners are `child`'s parents.
    pub fn pin_parents(&mut self, child: PersonIdx, family: usize) {
        self.builder.set_parent_family(child, family).unwrap();
    }

    pub fn build(self) -> FamilyGraph {
        self.builder.build()
    }
}

/// Three generations around a root (`@I1@`, born 1960):
///
/// - parents Karl 1930 (`@I20@`) and Maja 1932 (`@I21@`);
/// - Karl's parents Gustav 1900 and Hilda 1902, Maja's Oskar 1905 and Signe 1908;
/// - sister Lena 1958, daughter Ida 1990 married to Per 1988;
/// - uncle Nils 1933 married to aunt Elsa 1934, their son Jonas 1962.
pub struct Sample {
    pub graph: FamilyGraph,
    pub root: PersonIdx,
}

pub fn sample() -> Sample {
    let mut t = Tree::new();
    let gustav = t.person(10, "Gustav", Some(1900));
    let hilda = t.person(11, "Hilda", Some(1902));
    let oskar = t.person(12, "Oskar", Some(1905));
    let signe = t.person(13, "Signe", Some(1908));
    let karl = t.person(20, "Karl", Some(1930));
    let maja = t.person(21, "Maja", Some(1932));
    let nils = t.person(22, "Nils", Some(1933));
    let elsa = t.person(23, "Elsa", Some(1934));
    let root = t.person(1, "Root", Some(1960));
    let lena = t.person(30, "Lena", Some(1958));
    let jonas = t.person(31, "Jonas", Some(1962));
    let per = t.person(40, "Per", Some(1988));
    let ida = t.person(41, "Ida", Some(1990));

    t.couple(gustav, hilda, &[karl, nils]);
    t.couple(oskar, signe, &[maja, elsa]);
    t.couple(karl, maja, &[lena, root]);
    t.couple(nils, elsa, &[jonas]);
    t.couple(per, ida, &[]);
    t.family(Some(root), None, &[ida]);

    Sample {
        graph: t.build(),
        root,
    }
}

pub fn idx(graph: &FamilyGraph, xref: &str) -> PersonIdx {
    graph.find(xref).unwrap()
}
