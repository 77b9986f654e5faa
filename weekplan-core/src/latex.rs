//! LaTeX/TikZ markup for day slots, week pages and the whole document.

use chrono::Datelike;
use indoc::{formatdoc, indoc};

use crate::day::DaySlots;
use crate::locale::Locale;
use crate::weeks::Week;

/// Names of the first six hourly nodes; the afternoon column hangs off them.
const ROW_ANCHORS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

const PREAMBLE: &str = indoc! {r"
    \documentclass{article}
    \usepackage{geometry}
    \geometry{%
      paperheight=594pt,
      paperwidth=369pt,
      layoutsize={364.5pt,585pt},
      layoutoffset={9pt,9pt},
      top=-43pt,
      bottom=10pt,
      right=10pt,
      left=30pt,
      twoside,
      showcrop
    }

    \usepackage{xcolor}
    \usepackage{lmodern}
    \usepackage{tikz}
        \usetikzlibrary{positioning}
    \usepackage{afterpage}

    \newcommand\blankpage{%
        \null
        \thispagestyle{empty}%
        \addtocounter{page}{-1}%
        \newpage}

    \newcommand\blackpage{%
        \null
        \thispagestyle{empty}%
        \addtocounter{page}{-1}%
        \pagecolor{black}%
        \newpage}
"};

const CLOSING: &str = indoc! {r"
        \afterpage{\blankpage}
        \afterpage{\blackpage}
    \end{document}
"};

const WEEK_HEADER: &str = indoc! {r"
    \begin{tikzpicture}[%
            inner sep=3 pt,
            dayname/.style={%
                node font=\footnotesize,
            },
            tiny/.style={%
                node font=\tiny\scshape,
            },
            daynumber/.style={%
                anchor=north east,
                node font=\normalsize\bfseries,
            },
            xscale = 6,
            yscale=-2.6,
        ]
"};

const WEEK_GRID: &str = indoc! {r"
        \foreach \i in {0,1,...,8} {%
            \draw (-0.25,\i) -- (2,\i);
        }
    \end{tikzpicture}
"};

/// Title page contents.
#[derive(Debug, Clone)]
pub struct TitlePage {
    pub year: i32,
    pub author: String,
    pub author_mail: String,
    pub author_phone: String,
}

/// Nodes for one day's slots. Callers pass nothing at all for a day without
/// events.
pub fn day_events(slots: &DaySlots) -> String {
    let mut out = String::new();

    for (index, text) in slots.hourly.iter().enumerate() {
        let line = match index {
            0..=5 => format!(
                "    \\node ({})[below={}em of day.west,anchor=west] [tiny] {{{}}};\n",
                ROW_ANCHORS[index],
                index + 1,
                text
            ),
            6 => format!("    \\node [right= 13.5em of day.west,anchor=west] [tiny] {{{text}}};\n"),
            _ => format!(
                "    \\node [right= 13.5em of {}.west,anchor=west] [tiny] {{{}}};\n",
                ROW_ANCHORS[index - 7],
                text
            ),
        };
        out.push_str(&line);
    }

    let [first, second, third] = &slots.all_day;
    out.push_str(&format!(
        "    \\node (full)[below=6em of day_number,rotate=90,anchor=west][tiny] {{{first}}};\n"
    ));
    out.push_str(&format!(
        "    \\node [left=1em of full,anchor=west,rotate=90][tiny] {{{second}}};\n"
    ));
    out.push_str(&format!(
        "    \\node [left=2em of full,anchor=west,rotate=90][tiny] {{{third}}};\n"
    ));

    out
}

/// One page for `week`. `days` holds the rendered day contributions Monday
/// first; the page lists Sunday at the top and Monday at the bottom.
pub fn week_page(week: &Week, days: &[String; 7], locale: Locale) -> String {
    let mut out = String::from("\n");
    out.push_str(WEEK_HEADER);

    for (index, date) in week.days.iter().enumerate().rev() {
        let row = index + 1;
        out.push_str(&format!(
            "\n    \\node (day_number) at (0,{row}) [daynumber] {{{}}};\n",
            date.day()
        ));
        out.push_str(&format!(
            "    \\node (day)[base right = 1em of day_number, anchor=base west] [dayname] {{{}}};\n",
            locale.weekday_name(*date)
        ));
        out.push_str(&days[index]);
    }

    out.push_str(&format!(
        "\n    \\node (year_number) at (0,1) [anchor = south east, minimum height = 2em] {{{}}};\n",
        week.year
    ));
    out.push_str(&format!(
        "    \\node [base right = 1em of year_number, anchor=base west, node font=\\Large] {{{}}};\n",
        locale.month_name(week.month)
    ));
    out.push_str(&format!(
        "    \\node [below = 53em of year_number.east, node font=\\footnotesize] {{{} {}}};\n\n",
        locale.week_label(),
        week.number()
    ));
    out.push_str(WEEK_GRID);

    out
}

/// The full document: title page, all week pages, trailing filler pages.
pub fn document(title: &TitlePage, weeks: &str) -> String {
    let mut out = String::from(PREAMBLE);

    out.push_str(&formatdoc! {r"

        \begin{{document}}
            \pagecolor{{black}}
            \shipout\null
            \nopagecolor
            \begin{{titlepage}}
                \vspace*{{\fill}}
                \begin{{center}}
                  \huge{{{year}}}\\[1cm]
                  \large{{{author}}}\\[0.5cm]
                  \footnotesize{{{mail}}}\\[0.1cm]
                  \footnotesize{{{phone}}}
                \end{{center}}
                \vspace*{{\fill}}
            \end{{titlepage}}
        ",
        year = title.year,
        author = title.author,
        mail = title.author_mail,
        phone = title.author_phone,
    });
    out.push_str(weeks);
    out.push_str(CLOSING);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weeks::year_weeks;
    use chrono::NaiveDate;

    fn title() -> TitlePage {
        TitlePage {
            year: 2024,
            author: "Anna Muster".to_string(),
            author_mail: "anna@example.ch".to_string(),
            author_phone: "+41 79 000 00 00".to_string(),
        }
    }

    #[test]
    fn day_events_has_all_sixteen_nodes() {
        let mut slots = DaySlots::default();
        slots.hourly[0] = "07:00 Gym ".to_string();
        slots.hourly[12] = "21:00 Film ".to_string();
        slots.all_day[2] = "Ferien".to_string();

        let markup = day_events(&slots);
        assert_eq!(markup.lines().count(), 16);
        assert!(markup.contains(r"\node (a)[below=1em of day.west,anchor=west] [tiny] {07:00 Gym };"));
        assert!(markup.contains(r"\node [right= 13.5em of f.west,anchor=west] [tiny] {21:00 Film };"));
        assert!(markup.contains(r"\node [left=2em of full,anchor=west,rotate=90][tiny] {Ferien};"));
    }

    #[test]
    fn week_page_lists_sunday_first() {
        let weeks = year_weeks(2024).unwrap();
        let week = weeks
            .iter()
            .find(|w| w.contains(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()))
            .unwrap();
        let days: [String; 7] = std::array::from_fn(|i| format!("% day {i}\n"));

        let page = week_page(week, &days, Locale::DeCh);

        let sunday = page.find(r"at (0,7) [daynumber] {10}").expect("Sunday row");
        let monday = page.find(r"at (0,1) [daynumber] {4}").expect("Monday row");
        assert!(sunday < monday, "Sunday should be drawn before Monday");
        assert!(page.find("Sonntag").unwrap() < page.find("Montag").unwrap());
        assert!(page.find("% day 6").unwrap() < page.find("% day 0").unwrap());
        assert!(page.contains("{März}"));
        assert!(page.contains("{KW 10}"));
        assert!(page.contains("{2024}"));
        assert!(page.trim_end().ends_with(r"\end{tikzpicture}"));
    }

    #[test]
    fn document_wraps_title_and_weeks() {
        let doc = document(&title(), "%% WEEKS %%\n");
        assert!(doc.starts_with(r"\documentclass{article}"));
        assert!(doc.contains(r"\huge{2024}\\[1cm]"));
        assert!(doc.contains(r"\large{Anna Muster}"));
        assert!(doc.contains(r"\footnotesize{anna@example.ch}"));
        let weeks = doc.find("%% WEEKS %%").unwrap();
        assert!(doc.find(r"\end{titlepage}").unwrap() < weeks);
        assert!(weeks < doc.find(r"\afterpage{\blankpage}").unwrap());
        assert!(doc.trim_end().ends_with(r"\end{document}"));
    }
}
