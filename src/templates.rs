//! HTML page rendering.
//!
//! Three pages, built with format! over a shared stylesheet: the upload
//! form, the quiz form, and the result/revision page. Anything derived
//! from document text goes through html_escape first.

use crate::quiz::QuizItem;

fn page(title: &str, css: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>StudyLoop - {}</title>\n\
         <style>{}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n{}</div>\n\
         </body>\n\
         </html>\n",
        title, css, body
    )
}

/// Upload form. One PDF file field named `studyfile`.
pub fn render_index(css: &str) -> String {
    page(
        "Upload",
        css,
        "<h2>\u{1F4DA} StudyLoop</h2>\n\
         <form method=\"POST\" enctype=\"multipart/form-data\">\n\
         <label>Select your study material (PDF):</label><br><br>\n\
         <input type=\"file\" name=\"studyfile\" required><br><br>\n\
         <button type=\"submit\">Start Quiz</button>\n\
         </form>\n",
    )
}

/// Quiz form. One text input named `answer_<id>` per item.
pub fn render_quiz(css: &str, quiz: &[QuizItem]) -> String {
    let mut body = String::from("<h2>Quiz Time!</h2>\n<form method=\"POST\">\n");
    for (i, item) in quiz.iter().enumerate() {
        body.push_str(&format!(
            "<p><b>Q{}:</b> {}</p>\n\
             <input type=\"text\" name=\"answer_{}\" required><br><br>\n",
            i + 1,
            html_escape::encode_text(&item.question),
            item.id
        ));
    }
    body.push_str("<button type=\"submit\">Submit Quiz</button>\n</form>\n");
    page("Quiz", css, &body)
}

/// Result page: score, revision list, link back to the upload form.
pub fn render_result(css: &str, score: usize, total: usize, revision: &[String]) -> String {
    let mut body = format!(
        "<h2>Your Score: {}/{}</h2>\n<h3>\u{1F4DD} Revision Content:</h3>\n",
        score, total
    );
    if revision.is_empty() {
        body.push_str("<p>Great job! No revision needed.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for entry in revision {
            body.push_str(&format!("<li>{}</li>\n", html_escape::encode_text(entry)));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("<br><br>\n<a href=\"/\">Upload Another File</a>\n");
    page("Result", css, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CSS;

    #[test]
    fn test_index_has_upload_field() {
        let html = render_index(DEFAULT_CSS);
        assert!(html.contains("name=\"studyfile\""));
        assert!(html.contains("multipart/form-data"));
        assert!(html.contains(DEFAULT_CSS));
    }

    #[test]
    fn test_quiz_inputs_are_keyed_by_item_id() {
        let quiz = vec![
            QuizItem {
                id: 0,
                question: "The mitochondria is the _ of the cell".to_string(),
                answer: "powerhouse".to_string(),
            },
            QuizItem {
                id: 3,
                question: "Rust programs are compiled ahead _ time".to_string(),
                answer: "of".to_string(),
            },
        ];
        let html = render_quiz(DEFAULT_CSS, &quiz);
        assert!(html.contains("name=\"answer_0\""));
        assert!(html.contains("name=\"answer_3\""));
        assert!(html.contains("<b>Q1:</b>"));
        assert!(html.contains("<b>Q2:</b>"));
    }

    #[test]
    fn test_question_text_is_escaped() {
        let quiz = vec![QuizItem {
            id: 0,
            question: "x < y implies _ > x according to <script>".to_string(),
            answer: "y".to_string(),
        }];
        let html = render_quiz(DEFAULT_CSS, &quiz);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_result_with_and_without_revision() {
        let html = render_result(DEFAULT_CSS, 3, 5, &["The sun rises in the east".to_string()]);
        assert!(html.contains("Your Score: 3/5"));
        assert!(html.contains("<li>The sun rises in the east</li>"));

        let html = render_result(DEFAULT_CSS, 5, 5, &[]);
        assert!(html.contains("Great job! No revision needed."));
        assert!(!html.contains("<li>"));
    }
}
