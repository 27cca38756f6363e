//! Published College Board code tables for the AP Student Datafile, plus the
//! letter-grade point scale. Pure lookup data, reproduced exactly; codes
//! absent from a table are rejected by the parser, never guessed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::LetterGrade;

/// AP award type code -> award name. Codes 10 and 11 are unassigned.
pub fn award_name(code: u8) -> Option<&'static str> {
    let name = match code {
        1 => "AP Scholar",
        2 => "AP Scholar with Honor",
        3 => "AP Scholar with Distinction",
        4 => "State AP Scholar",
        5 => "National AP Scholar",
        6 => "National AP Scholar (Canada)",
        7 => "AP International Diploma",
        8 => "DoDEA AP Scholar",
        9 => "International AP Scholar",
        12 => "National AP Scholar (Bermuda)",
        13 => "AP Capstone Diploma",
        14 => "AP Seminar and Research Certificate",
        _ => return None,
    };
    Some(name)
}

/// AP exam subject code -> subject name.
pub fn exam_subject(code: u8) -> Option<&'static str> {
    let subject = match code {
        7 => "United States History",
        10 => "African American Studies",
        13 => "Art History",
        14 => "Drawing",
        15 => "2-D Art and Design",
        16 => "3-D Art and Design",
        20 => "Biology",
        22 => "Seminar",
        23 => "Research",
        25 => "Chemistry",
        28 => "Chinese Language and Culture",
        31 => "Computer Science A",
        32 => "Computer Science Principles",
        33 => "Computer Science AB",
        34 => "Microeconomics",
        35 => "Macroeconomics",
        36 => "English Language and Composition",
        37 => "English Literature and Composition",
        40 => "Environmental Science",
        43 => "European History",
        48 => "French Language and Culture",
        51 => "French Literature",
        53 => "Human Geography",
        55 => "German Language and Culture",
        57 => "United States Government and Politics",
        58 => "Comparative Government and Politics",
        60 => "Latin",
        61 => "Latin Literature",
        62 => "Italian Language and Culture",
        64 => "Japanese Language and Culture",
        65 => "Precalculus",
        66 => "Calculus AB",
        68 => "Calculus BC",
        69 => "Calculus BC: AB Subscore",
        75 => "Music Theory",
        76 => "Music Aural Subscore",
        77 => "Music Non-Aural Subscore",
        78 => "Physics B",
        80 => "Physics C: Mechanics",
        82 => "Physics C: Electricity and Magnetism",
        83 => "Physics 1",
        84 => "Physics 2",
        85 => "Psychology",
        87 => "Spanish Language and Culture",
        89 => "Spanish Literature and Culture",
        90 => "Statistics",
        93 => "World History: Modern",
        _ => return None,
    };
    Some(subject)
}

/// Subscore subjects ride alongside a parent exam and are reported
/// separately from full exam scores.
pub fn is_subscore(code: u8) -> bool {
    matches!(code, 69 | 76 | 77)
}

/// Base grade points on the 4.0 scale. Pass/No-Pass, Incomplete, and
/// Withdrawn grades have no point value and never count toward GPA.
pub fn base_points(grade: LetterGrade) -> Option<Decimal> {
    let points = match grade {
        LetterGrade::APlus | LetterGrade::A => dec!(4.0),
        LetterGrade::AMinus => dec!(3.7),
        LetterGrade::BPlus => dec!(3.3),
        LetterGrade::B => dec!(3.0),
        LetterGrade::BMinus => dec!(2.7),
        LetterGrade::CPlus => dec!(2.3),
        LetterGrade::C => dec!(2.0),
        LetterGrade::CMinus => dec!(1.7),
        LetterGrade::DPlus => dec!(1.3),
        LetterGrade::D => dec!(1.0),
        LetterGrade::DMinus => dec!(0.7),
        LetterGrade::F => dec!(0.0),
        LetterGrade::Pass
        | LetterGrade::NoPass
        | LetterGrade::Incomplete
        | LetterGrade::Withdrawn => return None,
    };
    Some(points)
}
