#[cfg(test)]
pub const POST_DATA_MD: &str = r##"---
title: "What I learned after 20+ years of software development"
description: "How to be a great software engineer?"
section: "Notes"
tags: "career, engineering,"
created: "April 2, 2022"
updated: ""
type: "note"
---

# What I learned after 20+ years of software development

How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. __The earlier you find that, the better.__ See [this talk](https://example.com/talk).
"##;

#[cfg(test)]
pub const POST_DATA_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <!-- Metadata -->
  <!-- Title: Creating a daemon in System D -->
  <!-- Created: February 16, 2024 -->
  <!-- Updated: February 18, 2024 -->
  <!-- Description: So, you created your awesome server-side application -->
  <!-- Tags: linux, systemd -->
  <title>Creating a daemon in System D - Blog</title>
</head>
<body>
  <header class="post-heading">
    <h1>Creating a daemon in System D</h1>
  </header>
  <main>
    <div class="post-content">
      <h2>Why a daemon?</h2>
      <p>Because <em>someone</em> has to keep it <strong>running</strong>.<br>Always.</p>
      <p>Read the <a href="https://systemd.io" class="ext">manual</a> first.</p>
    </div>
    <div class="back-button-container">
      <a href="../" class="back-button">Back to home</a>
    </div>
  </main>
</body>
</html>
"##;

#[cfg(test)]
pub const HOMEPAGE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<body>
  <section id="notes">
    <h2>Notes</h2>
    <!-- Notes will be dynamically inserted here -->
  </section>
</body>
</html>
"##;
