pub mod html_to_markdown;
