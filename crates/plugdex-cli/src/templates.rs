//! Built-in host page templates.
//!
//! Stand-ins for the documentation site's pages: each carries the element ids
//! the views splice their fragments into.

pub const HOMEPAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Plugin Directory</title>
</head>
<body>
  <header>
    <h1>Plugin Directory</h1>
    <span id="plugin-count"></span>
  </header>
  <section class="latest-plugins">
    <h2>Latest Plugins</h2>
    <div id="plugin-container"></div>
  </section>
</body>
</html>
"#;

pub const DIRECTORY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Plugin Database</title>
</head>
<body>
  <header>
    <h1>Plugin Database</h1>
  </header>
  <div class="filters">
    <select id="category"></select>
    <select id="sort">
      <option value="latest">Latest Release</option>
      <option value="name">Name</option>
      <option value="stars">Stars</option>
      <option value="forks">Forks</option>
    </select>
    <input id="search" type="search" placeholder="Search plugins...">
    <button id="clear-search" type="button">Clear</button>
  </div>
  <p id="results-info"></p>
  <div id="plugin-container"></div>
</body>
</html>
"#;
