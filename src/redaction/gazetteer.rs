// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Word lists backing the rule-based annotator

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

// ============================================================================
// Person names
// ============================================================================

// Common given names. Names that are also places (Paris, Georgia, Jordan)
// are left out so the place gazetteer can claim them.
pub static FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "Aaron", "Abigail", "Adam", "Alan", "Albert", "Alex", "Alexander", "Alice", "Amanda",
        "Amy", "Andrew", "Angela", "Ann", "Anna", "Anne", "Anthony", "Arthur", "Barbara",
        "Benjamin", "Betty", "Bill", "Bob", "Brandon", "Brian", "Bruce", "Carl", "Carol",
        "Caroline", "Catherine", "Charles", "Charlotte", "Chris", "Christina", "Christine",
        "Christopher", "Daniel", "David", "Deborah", "Dennis", "Diana", "Donald", "Donna",
        "Dorothy", "Douglas", "Edward", "Elizabeth", "Emily", "Emma", "Eric", "Frank", "Gary",
        "George", "Gerald", "Grace", "Gregory", "Hannah", "Harold", "Harry", "Heather", "Helen",
        "Henry", "Jack", "Jacob", "James", "Jane", "Janet", "Jason", "Jeff", "Jeffrey",
        "Jennifer", "Jeremy", "Jerry", "Jessica", "Joan", "John", "Jonathan", "Joseph", "Joshua",
        "Joyce", "Judith", "Julia", "Julie", "Justin", "Karen", "Kate", "Katherine", "Kathleen",
        "Keith", "Kelly", "Kenneth", "Kevin", "Kimberly", "Larry", "Laura", "Lauren", "Linda",
        "Lisa", "Louis", "Margaret", "Maria", "Marie", "Mark", "Martha", "Mary", "Matthew",
        "Megan", "Melissa", "Michael", "Michelle", "Nancy", "Nathan", "Nicholas", "Nicole",
        "Olivia", "Pamela", "Patricia", "Patrick", "Paul", "Peter", "Philip", "Rachel", "Ralph",
        "Raymond", "Rebecca", "Richard", "Robert", "Roger", "Ronald", "Rose", "Ruth", "Ryan",
        "Samuel", "Sandra", "Sara", "Sarah", "Scott", "Sharon", "Sophia", "Stephanie",
        "Stephen", "Steven", "Susan", "Teresa", "Thomas", "Timothy", "Tyler", "Victoria",
        "Vincent", "Walter", "William", "Zachary",
        "Ken", "Sherron", "Vince", "Andy", "Kay", "Phillip", "Sally", "Tana",
    ])
});

pub static TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "Mr", "Mrs", "Ms", "Miss", "Mx", "Dr", "Prof", "Professor", "Sir", "Dame", "Lady", "Lord",
        "Rev", "Judge", "Senator", "President", "Governor", "Mayor", "Officer", "Detective",
        "Captain", "Sergeant", "Agent", "Madam",
    ])
});

// Capitalised words that never continue a name.
pub static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "A", "An", "And", "Or", "But", "Nor", "The", "I", "In", "On", "At", "To", "Of", "For",
        "With", "From", "By", "As", "He", "She", "It", "We", "They", "You", "His", "Her", "Its",
        "Their", "Our", "My", "Your", "This", "That", "These", "Those", "If", "When", "Then",
        "So", "Is", "Was", "Are", "Were", "Be", "Has", "Had", "Have", "Do", "Did", "Not", "No",
        "Yes", "Inc", "Corp", "Co", "Ltd", "LLC", "Dear", "Hi", "Hello", "Thanks", "Regards",
    ])
});

// ============================================================================
// Dates
// ============================================================================

pub static MONTHS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December", "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug",
        "Sep", "Sept", "Oct", "Nov", "Dec",
    ])
});

// Month names that are also ordinary words; they need a day or year to count.
pub static AMBIGUOUS_MONTHS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["May", "March", "Jan", "Mar"]));

pub static WEEKDAYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ])
});

pub static RELATIVE_DAYS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["today", "tomorrow", "yesterday", "tonight"]));

pub static DEICTICS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["last", "next", "this", "past", "coming"]));

pub static PERIODS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "week", "weekend", "month", "year", "quarter", "decade", "spring", "summer", "autumn",
        "fall", "winter", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
        "sunday",
    ])
});

pub static TEMPORAL_PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "in", "since", "by", "during", "until", "till", "before", "after", "from", "through",
    ])
});

// ============================================================================
// Places
// ============================================================================

static PLACES: &[&str] = &[
    // Countries
    "United States", "United States of America", "America", "USA", "U.S", "Canada", "Mexico",
    "Brazil", "Argentina", "Chile", "Peru", "Colombia", "United Kingdom", "UK", "England",
    "Scotland", "Wales", "Ireland", "France", "Germany", "Spain", "Portugal", "Italy",
    "Netherlands", "Belgium", "Switzerland", "Austria", "Sweden", "Norway", "Denmark",
    "Finland", "Poland", "Greece", "Turkey", "Russia", "Ukraine", "Egypt", "Nigeria", "Kenya",
    "South Africa", "India", "Pakistan", "China", "Japan", "Korea", "South Korea",
    "North Korea", "Vietnam", "Thailand", "Indonesia", "Australia", "New Zealand", "Israel",
    "Iran", "Iraq", "Saudi Arabia", "Jordan", "Qatar",
    // US states
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
    // Cities
    "New York City", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia",
    "San Antonio", "San Diego", "Dallas", "San Jose", "Austin", "Jacksonville",
    "San Francisco", "Columbus", "Seattle", "Denver", "Boston", "Detroit", "Nashville",
    "Portland", "Las Vegas", "Baltimore", "Milwaukee", "Atlanta", "Miami", "Minneapolis",
    "New Orleans", "Cleveland", "Pittsburgh", "Sacramento", "Springfield", "Gainesville",
    "Orlando", "Tampa", "Omaha", "Washington D.C", "London", "Paris", "Berlin", "Madrid",
    "Rome", "Amsterdam", "Brussels", "Vienna", "Moscow", "Dublin", "Toronto", "Montreal",
    "Vancouver", "Calgary", "Tokyo", "Beijing", "Shanghai", "Hong Kong", "Singapore",
    "Mumbai", "Delhi", "Sydney", "Melbourne", "Dubai", "Cairo", "Lagos", "Nairobi",
];

/// Places keyed by their first token, each split into tokens, longest first.
pub static PLACE_INDEX: Lazy<HashMap<&'static str, Vec<Vec<&'static str>>>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, Vec<Vec<&'static str>>> = HashMap::new();
    for place in PLACES {
        let parts: Vec<&'static str> = place.split(' ').collect();
        index.entry(parts[0]).or_default().push(parts);
    }
    for entries in index.values_mut() {
        entries.sort_by(|a, b| b.len().cmp(&a.len()));
    }
    index
});

pub static NATURAL_PREFIXES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| set(&["Lake", "Mount", "Mt", "Cape", "Gulf", "Isle"]));

pub static NATURAL_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "River", "Ocean", "Sea", "Mountains", "Mountain", "Valley", "Desert", "Island",
        "Islands", "Canyon", "Forest", "Falls", "Bay", "Peninsula",
    ])
});

pub static FACILITY_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "Airport", "Bridge", "Tower", "Stadium", "Arena", "Hospital", "Museum", "Station",
        "Building", "Center", "Centre", "Park", "Library", "Cathedral", "Mall", "Plaza",
        "Square", "Hotel", "Terminal",
    ])
});

// ============================================================================
// Segmentation and numbers
// ============================================================================

// Words whose trailing period does not end a sentence.
pub static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "mr", "mrs", "ms", "mx", "dr", "prof", "sr", "jr", "st", "mt", "rev", "gen", "col",
        "capt", "sgt", "lt", "gov", "sen", "rep", "vs", "etc", "approx", "dept", "apt",
        "ave", "blvd", "rd", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
        "sept", "oct", "nov", "dec",
    ])
});

pub static NUMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
        "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy",
        "eighty", "ninety", "hundred", "thousand", "million", "billion",
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_index_longest_first() {
        let new = &PLACE_INDEX["New"];
        assert_eq!(new[0], vec!["New", "York", "City"]);
        assert!(new.iter().any(|p| p == &vec!["New", "York"]));
    }

    #[test]
    fn test_ambiguous_places_not_first_names() {
        for word in ["Paris", "Georgia", "Jordan", "Washington"] {
            assert!(!FIRST_NAMES.contains(word), "{word}");
        }
    }
}
