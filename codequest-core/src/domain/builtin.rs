//! Bundled activity content.

use crate::domain::{Activity, Difficulty};
use crate::games::{
    DragClassifySpec, GameSpec, MissPolicy, PairsMemorySpec, Question, SequenceRecallSpec,
    SingleShotSpec, SortItemSpec, TimedMatchSpec,
};

pub(crate) fn activities() -> Vec<Activity> {
    vec![
        Activity::new(
            1,
            "Color Match",
            GameSpec::TimedMatch(TimedMatchSpec::new(
                "Click the color named above",
                &["Red", "Green", "Blue", "Yellow", "Purple", "Orange"],
                30,
            )),
        )
        .with_description("Match colors as fast as you can before the timer runs out")
        .with_category("Visual")
        .with_estimated_time("1 min")
        .with_points(10),
        Activity::new(
            2,
            "Number Match",
            GameSpec::TimedMatch(
                TimedMatchSpec::new(
                    "Find the number shown above",
                    &["1", "2", "3", "4", "5", "6", "7", "8", "9"],
                    45,
                )
                .with_target_score(10),
            ),
        )
        .with_description("Score ten matches before the clock hits zero")
        .with_category("Math")
        .with_estimated_time("1 min")
        .with_points(15),
        Activity::new(
            3,
            "Pattern Memory",
            GameSpec::SequenceRecall(SequenceRecallSpec::presets(vec![
                vec![true, false, true, false, true],
                vec![false, true, true, true, false],
                vec![true, true, false, true, true],
                vec![true, false, false, true, true],
            ])),
        )
        .with_description("Watch the lit cells, then click them from left to right")
        .with_difficulty(Difficulty::Intermediate)
        .with_category("Memory")
        .with_estimated_time("3 min")
        .with_points(20),
        Activity::new(
            4,
            "Sequence Builder",
            GameSpec::SequenceRecall(SequenceRecallSpec::growing(4, 3, 5)),
        )
        .with_description("Repeat a sequence that grows one step every level")
        .with_difficulty(Difficulty::Intermediate)
        .with_category("Memory")
        .with_estimated_time("5 min")
        .with_points(25),
        Activity::new(
            5,
            "Memory Pairs",
            GameSpec::PairsMemory(PairsMemorySpec::new(&[
                "{}", "[]", "()", "<>", "=>", "::", "&&", "||",
            ])),
        )
        .with_description("Flip cards and find all eight pairs of brackets and operators")
        .with_category("Memory")
        .with_estimated_time("4 min")
        .with_points(15),
        Activity::new(
            6,
            "Shape Sorter",
            GameSpec::DragClassify(DragClassifySpec::uniform(
                &["circle", "square", "triangle", "star"],
                3,
            )),
        )
        .with_description("Drag every shape into its matching bin")
        .with_category("Visual")
        .with_estimated_time("2 min")
        .with_points(10),
        Activity::new(7, "Coding Quiz", GameSpec::SingleShot(coding_quiz()))
            .with_description("Test your knowledge of programming basics")
            .with_category("Programming")
            .with_estimated_time("5 min")
            .with_points(20),
        Activity::new(8, "Math Challenge", GameSpec::SingleShot(math_challenge()))
            .with_description("Solve arithmetic problems in your head")
            .with_difficulty(Difficulty::Intermediate)
            .with_category("Math")
            .with_estimated_time("5 min")
            .with_points(20),
        Activity::new(9, "Debug the Code", GameSpec::SingleShot(debug_the_code()))
            .with_description("Each program has a bug. Fix it so it prints the right output")
            .with_difficulty(Difficulty::Advanced)
            .with_category("Programming")
            .with_estimated_time("10 min")
            .with_points(30),
        Activity::new(10, "Syntax Fix", GameSpec::SingleShot(syntax_fix()))
            .with_description("These programs do not run. Repair the syntax")
            .with_difficulty(Difficulty::Intermediate)
            .with_category("Programming")
            .with_estimated_time("5 min")
            .with_points(25),
        Activity::new(
            11,
            "Variables Playground",
            GameSpec::SingleShot(variables_playground()),
        )
        .with_description("Declare, update and print variables")
        .with_category("Programming")
        .with_estimated_time("5 min")
        .with_points(15),
        Activity::new(12, "Loop Explorer", GameSpec::SingleShot(loop_explorer()))
            .with_description("Write loops that print the requested numbers")
            .with_difficulty(Difficulty::Intermediate)
            .with_category("Programming")
            .with_estimated_time("8 min")
            .with_points(25),
        Activity::new(
            13,
            "Function Builder",
            GameSpec::SingleShot(function_builder()),
        )
        .with_description("Write small functions and call them")
        .with_difficulty(Difficulty::Advanced)
        .with_category("Programming")
        .with_estimated_time("10 min")
        .with_points(30),
        Activity::new(
            14,
            "Token Sorter",
            GameSpec::DragClassify(token_sorter()),
        )
        .with_description("Sort code tokens into keywords, operators and literals")
        .with_difficulty(Difficulty::Intermediate)
        .with_category("Programming")
        .with_estimated_time("3 min")
        .with_points(20),
    ]
}

fn coding_quiz() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::choice(
            "Which keyword declares a variable?",
            &["fn", "let", "loop", "use"],
            1,
        ),
        Question::choice("What does `5 % 2` evaluate to?", &["2", "2.5", "1", "0"], 2)
            .with_explanation("% gives the remainder of a division."),
        Question::choice(
            "Which operator checks two values for equality?",
            &["=", "==", "!=", "=>"],
            1,
        ),
        Question::text("What does this program print?", &["4"])
            .with_code("print(len(\"code\"));"),
        Question::text(
            "Which keyword sends a value back from a function?",
            &["return"],
        ),
    ])
}

fn math_challenge() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::number("12 × 12 = ?", 144),
        Question::number("81 ÷ 9 = ?", 9),
        Question::number("15 + 27 = ?", 42),
        Question::number("100 − 37 = ?", 63),
        Question::number("What is 2 to the power of 10?", 1024),
    ])
    .with_miss_policy(MissPolicy::Reveal)
    .shuffled()
}

fn debug_the_code() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::program(
            "This loop should print 1 to 5 but prints 0 to 4.",
            "for i in 0..5 {\n    print(i);\n}",
            &["1", "2", "3", "4", "5"],
        ),
        Question::program(
            "The sum of 1 + 2 + 3 + 4 should be 10.",
            "let sum = 0;\nfor i in 1..4 {\n    sum = sum + i;\n}\nprint(sum);",
            &["10"],
        ),
        Question::program(
            "The countdown never stops. Make it print 3, 2, 1.",
            "let n = 3;\nwhile n > 0 {\n    print(n);\n}",
            &["3", "2", "1"],
        )
        .with_explanation("The loop variable must change or the condition never becomes false."),
    ])
}

fn syntax_fix() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::program(
            "Add the missing semicolon.",
            "let greeting = \"Hello\"\nprint(greeting);",
            &["Hello"],
        ),
        Question::program(
            "Close the string.",
            "print(\"Hello, World!);",
            &["Hello, World!"],
        ),
        Question::program(
            "Balance the braces.",
            "if 3 > 2 {\n    print(\"yes\");\n",
            &["yes"],
        ),
    ])
}

fn variables_playground() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::program(
            "Print the value of x times two.",
            "let x = 5;\n",
            &["10"],
        ),
        Question::program(
            "Swap a and b, then print a and then b.",
            "let a = 1;\nlet b = 2;\n",
            &["2", "1"],
        )
        .with_explanation("A third variable keeps one value while you overwrite it."),
        Question::program(
            "Build the message \"Hi, Ada!\" from the name variable and print it.",
            "let name = \"Ada\";\n",
            &["Hi, Ada!"],
        ),
    ])
}

fn loop_explorer() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::program(
            "Print the even numbers from 2 to 10.",
            "for i in 1..6 {\n    \n}",
            &["2", "4", "6", "8", "10"],
        ),
        Question::program(
            "Use a while loop to count down from 3 to 1.",
            "let n = 3;\n",
            &["3", "2", "1"],
        ),
        Question::program(
            "Print the sum of the numbers 1 to 100.",
            "let total = 0;\n",
            &["5050"],
        ),
    ])
}

fn function_builder() -> SingleShotSpec {
    SingleShotSpec::new(vec![
        Question::program(
            "Write fn square(n) and print square(7).",
            "fn square(n) {\n    \n}\n",
            &["49"],
        ),
        Question::program(
            "Write fn max(a, b) returning the larger value and print max(3, 9).",
            "fn max(a, b) {\n    \n}\n",
            &["9"],
        ),
        Question::program(
            "Write a recursive fn fact(n) and print fact(5).",
            "fn fact(n) {\n    \n}\n",
            &["120"],
        ),
    ])
}

fn token_sorter() -> DragClassifySpec {
    let categories = ["keyword", "operator", "literal"];
    let tokens: [(&str, usize); 9] = [
        ("let", 0),
        ("while", 0),
        ("fn", 0),
        ("+", 1),
        ("==", 1),
        ("&&", 1),
        ("42", 2),
        ("\"hi\"", 2),
        ("true", 2),
    ];

    DragClassifySpec {
        categories: categories.iter().map(|c| c.to_string()).collect(),
        items: tokens
            .iter()
            .map(|(label, category)| SortItemSpec {
                label: label.to_string(),
                category: *category,
            })
            .collect(),
    }
}
