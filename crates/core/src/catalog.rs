//! The ordered list of courses shipped with the app.
//!
//! Order matters: a course unlocks once the one before it is completed.

use std::collections::HashSet;

use crate::model::{Course, CourseError, CourseId, CourseKind, Item, ItemId, Level};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Build a catalog from courses in unlock order.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::DuplicateCourse` if two courses share an id.
    pub fn new(courses: Vec<Course>) -> Result<Self, CourseError> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.id().clone()) {
                return Err(CourseError::DuplicateCourse(course.id().clone()));
            }
        }
        Ok(Self { courses })
    }

    /// Alphabet, numbers, greetings and café phrases.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the built-in tables are inconsistent.
    pub fn builtin() -> Result<Self, CourseError> {
        Self::new(vec![alphabet()?, numbers()?, greetings()?, cafe()?])
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &CourseId> + '_ {
        self.courses.iter().map(Course::id)
    }
}

type Row = (u32, &'static str, &'static str, &'static str);

fn level(number: u32, title: &str, rows: &[Row]) -> Level {
    let items = rows
        .iter()
        .map(|(id, georgian, translit, meaning)| {
            Item::new(ItemId::new(*id), *georgian, *translit, *meaning)
        })
        .collect();
    Level::new(number, title, items)
}

fn alphabet() -> Result<Course, CourseError> {
    // (id, letter, sound, letter name)
    const VOWELS_AND_FIRST: [Row; 11] = [
        (1, "ა", "a", "an"),
        (2, "ბ", "b", "ban"),
        (3, "გ", "g", "gan"),
        (4, "დ", "d", "don"),
        (5, "ე", "e", "en"),
        (6, "ვ", "v", "vin"),
        (7, "ზ", "z", "zen"),
        (8, "თ", "t", "tan"),
        (9, "ი", "i", "in"),
        (10, "კ", "k'", "k'an"),
        (11, "ლ", "l", "las"),
    ];
    const MIDDLE: [Row; 11] = [
        (12, "მ", "m", "man"),
        (13, "ნ", "n", "nar"),
        (14, "ო", "o", "on"),
        (15, "პ", "p'", "p'ar"),
        (16, "ჟ", "zh", "zhan"),
        (17, "რ", "r", "rae"),
        (18, "ს", "s", "san"),
        (19, "ტ", "t'", "t'ar"),
        (20, "უ", "u", "un"),
        (21, "ფ", "p", "par"),
        (22, "ქ", "k", "kan"),
    ];
    const LAST: [Row; 11] = [
        (23, "ღ", "gh", "ghan"),
        (24, "ყ", "q'", "q'ar"),
        (25, "შ", "sh", "shin"),
        (26, "ჩ", "ch", "chin"),
        (27, "ც", "ts", "tsan"),
        (28, "ძ", "dz", "dzil"),
        (29, "წ", "ts'", "ts'il"),
        (30, "ჭ", "ch'", "ch'ar"),
        (31, "ხ", "kh", "khan"),
        (32, "ჯ", "j", "jan"),
        (33, "ჰ", "h", "hae"),
    ];

    Course::new(
        CourseId::from_static("alphabet"),
        "Alphabet",
        "The 33 letters of the Mkhedruli script.",
        CourseKind::Alphabet,
        vec![
            level(1, "ა to ლ", &VOWELS_AND_FIRST),
            level(2, "მ to ქ", &MIDDLE),
            level(3, "ღ to ჰ", &LAST),
        ],
    )
}

fn numbers() -> Result<Course, CourseError> {
    // Item ids are the numeric values themselves.
    const ONE_TO_TEN: [Row; 10] = [
        (1, "ერთი", "erti", "one"),
        (2, "ორი", "ori", "two"),
        (3, "სამი", "sami", "three"),
        (4, "ოთხი", "otkhi", "four"),
        (5, "ხუთი", "khuti", "five"),
        (6, "ექვსი", "ekvsi", "six"),
        (7, "შვიდი", "shvidi", "seven"),
        (8, "რვა", "rva", "eight"),
        (9, "ცხრა", "tskhra", "nine"),
        (10, "ათი", "ati", "ten"),
    ];
    const BEYOND_TEN: [Row; 8] = [
        (11, "თერთმეტი", "tertmet'i", "eleven"),
        (12, "თორმეტი", "tormet'i", "twelve"),
        (20, "ოცი", "otsi", "twenty"),
        (30, "ოცდაათი", "otsdaati", "thirty"),
        (40, "ორმოცი", "ormotsi", "forty"),
        (50, "ორმოცდაათი", "ormotsdaati", "fifty"),
        (100, "ასი", "asi", "one hundred"),
        (1000, "ათასი", "atasi", "one thousand"),
    ];

    Course::new(
        CourseId::from_static("numbers"),
        "Numbers",
        "Counting from one to a thousand.",
        CourseKind::Numbers,
        vec![
            level(1, "1 to 10", &ONE_TO_TEN),
            level(2, "11 and beyond", &BEYOND_TEN),
        ],
    )
}

fn greetings() -> Result<Course, CourseError> {
    const BASICS: [Row; 8] = [
        (1, "გამარჯობა", "gamarjoba", "Hello"),
        (2, "დილა მშვიდობისა", "dila mshvidobisa", "Good morning"),
        (3, "საღამო მშვიდობისა", "saghamo mshvidobisa", "Good evening"),
        (4, "ნახვამდის", "nakhvamdis", "Goodbye"),
        (5, "მადლობა", "madloba", "Thank you"),
        (6, "გთხოვთ", "gtkhovt", "Please"),
        (7, "დიახ", "diakh", "Yes"),
        (8, "არა", "ara", "No"),
    ];
    const SMALL_TALK: [Row; 6] = [
        (9, "როგორ ხარ?", "rogor khar?", "How are you?"),
        (10, "კარგად ვარ, მადლობა", "k'argad var, madloba", "I'm fine, thank you"),
        (11, "რა გქვია?", "ra gkvia?", "What is your name?"),
        (12, "მე მქვია ნინო", "me mkvia nino", "My name is Nino"),
        (13, "სასიამოვნოა", "sasiamovnoa", "Nice to meet you"),
        (14, "ბოდიში", "bodishi", "Sorry"),
    ];

    Course::new(
        CourseId::from_static("greetings"),
        "Greetings",
        "Saying hello, thanks and goodbye.",
        CourseKind::Phrases,
        vec![
            level(1, "Basics", &BASICS),
            level(2, "Small talk", &SMALL_TALK),
        ],
    )
}

fn cafe() -> Result<Course, CourseError> {
    const MENU: [Row; 5] = [
        (1, "წყალი", "ts'q'ali", "Water"),
        (2, "ყავა", "q'ava", "Coffee"),
        (3, "ჩაი", "chai", "Tea"),
        (4, "პური", "p'uri", "Bread"),
        (5, "ღვინო", "ghvino", "Wine"),
    ];
    const ORDERING: [Row; 5] = [
        (6, "ერთი ყავა, თუ შეიძლება", "erti q'ava, tu sheidzleba", "One coffee, please"),
        (7, "მენიუ მომეცით, თუ შეიძლება", "meniu mometsit, tu sheidzleba", "The menu, please"),
        (8, "ანგარიში მომიტანეთ", "angarishi momit'anet", "Bring the bill"),
        (9, "ძალიან გემრიელია", "dzalian gemrielia", "It is very tasty"),
        (10, "გაუმარჯოს!", "gaumarjos!", "Cheers!"),
    ];

    Course::new(
        CourseId::from_static("cafe"),
        "At the Café",
        "Ordering food and drinks.",
        CourseKind::Phrases,
        vec![level(1, "On the menu", &MENU), level(2, "Ordering", &ORDERING)],
    )
}
