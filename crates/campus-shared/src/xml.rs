//! The forum-list XML document.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <forumlist>
//!   <forum id="1"><title>General</title>
//!     <topiclist><topic id="2"><title>Intro</title></topic></topiclist>
//!     <topiclistTotal>1</topiclistTotal>
//!   </forum>
//!   <forumlistTotal>1</forumlistTotal>
//! </forumlist>
//! ```
//!
//! The document is written without whitespace between elements.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

use crate::dto::ForumSummary;

/// Body returned by the listing call for any failure other than a missing
/// forums tool.
pub const ERROR_XML: &str =
    r#"<?xml version="1.0" encoding="UTF-8"?><errormsg>permission-failed canEditSite</errormsg>"#;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("Failed to write XML: {0}")]
    Write(String),
}

/// Serializer for a site's forums and their topics.
pub struct ForumListDocument<'a> {
    forums: &'a [ForumSummary],
}

impl<'a> ForumListDocument<'a> {
    pub fn new(forums: &'a [ForumSummary]) -> Self {
        Self { forums }
    }

    pub fn to_xml(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("forumlist")))?;

        for forum in self.forums {
            let id = forum.id.to_string();
            emit(
                &mut writer,
                Event::Start(BytesStart::new("forum").with_attributes([("id", id.as_str())])),
            )?;
            text_element(&mut writer, "title", &forum.title)?;

            emit(&mut writer, Event::Start(BytesStart::new("topiclist")))?;
            for topic in &forum.topics {
                let id = topic.id.to_string();
                emit(
                    &mut writer,
                    Event::Start(BytesStart::new("topic").with_attributes([("id", id.as_str())])),
                )?;
                text_element(&mut writer, "title", &topic.title)?;
                emit(&mut writer, Event::End(BytesEnd::new("topic")))?;
            }
            emit(&mut writer, Event::End(BytesEnd::new("topiclist")))?;

            text_element(&mut writer, "topiclistTotal", &forum.topics.len().to_string())?;
            emit(&mut writer, Event::End(BytesEnd::new("forum")))?;
        }

        text_element(&mut writer, "forumlistTotal", &self.forums.len().to_string())?;
        emit(&mut writer, Event::End(BytesEnd::new("forumlist")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), XmlError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::TopicSummary;

    fn forum(id: i64, title: &str, topics: &[(i64, &str)]) -> ForumSummary {
        ForumSummary {
            id,
            title: title.to_string(),
            topics: topics
                .iter()
                .map(|(id, title)| TopicSummary {
                    id: *id,
                    title: title.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_two_forums_one_topic_each() {
        let forums = vec![
            forum(1, "General", &[(2, "Intro")]),
            forum(3, "Labs", &[(4, "Week 1")]),
        ];

        let xml = ForumListDocument::new(&forums).to_xml().unwrap();

        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "<forumlist>",
                r#"<forum id="1"><title>General</title>"#,
                r#"<topiclist><topic id="2"><title>Intro</title></topic></topiclist>"#,
                "<topiclistTotal>1</topiclistTotal></forum>",
                r#"<forum id="3"><title>Labs</title>"#,
                r#"<topiclist><topic id="4"><title>Week 1</title></topic></topiclist>"#,
                "<topiclistTotal>1</topiclistTotal></forum>",
                "<forumlistTotal>2</forumlistTotal>",
                "</forumlist>"
            )
        );
    }

    #[test]
    fn test_empty_site() {
        let xml = ForumListDocument::new(&[]).to_xml().unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><forumlist><forumlistTotal>0</forumlistTotal></forumlist>"#
        );
    }

    #[test]
    fn test_titles_are_escaped() {
        let forums = vec![forum(1, "Q&A <live>", &[])];
        let xml = ForumListDocument::new(&forums).to_xml().unwrap();
        assert!(xml.contains("<title>Q&amp;A &lt;live&gt;</title>"));
        assert!(xml.contains("<topiclist></topiclist><topiclistTotal>0</topiclistTotal>"));
    }
}
