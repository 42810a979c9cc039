// Lesson catalog: keys are introduced a few at a time, home row first.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub title: &'static str,
    pub description: &'static str,
    pub letters: &'static [char],
}

pub static LESSONS: &[Lesson] = &[
    Lesson { title: "Home Row: Left Hand", description: "Rest your left fingers on A S D F.", letters: &['a', 's', 'd', 'f'] },
    Lesson { title: "Home Row: Right Hand", description: "Rest your right fingers on J K L ;.", letters: &['j', 'k', 'l', ';'] },
    Lesson { title: "Reach the Middle", description: "Index fingers stretch to G and H.", letters: &['g', 'h'] },
    Lesson { title: "Up to E and I", description: "Middle fingers reach up.", letters: &['e', 'i'] },
    Lesson { title: "Up to R and U", description: "Index fingers reach up.", letters: &['r', 'u'] },
    Lesson { title: "T and Y", description: "A long reach for the index fingers.", letters: &['t', 'y'] },
    Lesson { title: "W and O", description: "Ring fingers climb to the top row.", letters: &['w', 'o'] },
    Lesson { title: "Q and P", description: "Pinkies go exploring.", letters: &['q', 'p'] },
    Lesson { title: "Down to V and M", description: "Index fingers dip to the bottom row.", letters: &['v', 'm'] },
    Lesson { title: "B and N", description: "The last index-finger keys.", letters: &['b', 'n'] },
    Lesson { title: "C and Comma", description: "Middle fingers dip down.", letters: &['c', ','] },
    Lesson { title: "X and Period", description: "Ring fingers dip down.", letters: &['x', '.'] },
    Lesson { title: "Z and Slash", description: "Pinkies finish the keyboard!", letters: &['z', '/'] },
];

/// Every key introduced by lessons `0..=idx`, deduplicated, in first-seen order.
pub fn allowed_letters(idx: usize) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for lesson in LESSONS.iter().take(idx + 1) {
        for &c in lesson.letters {
            if !out.contains(&c) {
                out.push(c);
            }
        }
    }
    out
}
