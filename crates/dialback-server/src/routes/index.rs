//! The scheduling form — a single embedded page, no build step.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Schedule a Call</title>
  <style>
    * { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      max-width: 400px;
      margin: 50px auto;
      padding: 20px;
      background: #f5f5f5;
    }
    .container {
      background: white;
      padding: 30px;
      border-radius: 12px;
      box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    }
    h1 { font-size: 1.5em; margin-bottom: 20px; color: #333; text-align: center; }
    label { display: block; margin-bottom: 8px; font-weight: 500; }
    select, button {
      width: 100%;
      padding: 15px;
      font-size: 16px;
      border-radius: 8px;
      border: 1px solid #ddd;
    }
    select { margin-bottom: 20px; background: white; }
    button {
      background: #0066ff;
      color: white;
      border: none;
      cursor: pointer;
      font-weight: 600;
    }
    button:hover { background: #0052cc; }
    button:disabled { background: #ccc; cursor: not-allowed; }
    .message {
      margin-top: 20px;
      padding: 15px;
      border-radius: 8px;
      text-align: center;
      display: none;
    }
    .message.success { background: #d4edda; color: #155724; display: block; }
    .message.error { background: #f8d7da; color: #721c24; display: block; }
  </style>
</head>
<body>
  <div class="container">
    <h1>Schedule a Call</h1>
    <form id="scheduleForm">
      <label for="delay">Call me in:</label>
      <select name="delay" id="delay" required>
        <option value="1">1 minute</option>
        <option value="2">2 minutes</option>
        <option value="5">5 minutes</option>
        <option value="10">10 minutes</option>
        <option value="15">15 minutes</option>
        <option value="30">30 minutes</option>
        <option value="60">60 minutes</option>
      </select>
      <button type="submit" id="submitBtn">Schedule Call</button>
    </form>
    <div class="message" id="message"></div>
  </div>
  <script>
    var form = document.getElementById('scheduleForm');
    var btn = document.getElementById('submitBtn');
    var message = document.getElementById('message');

    form.addEventListener('submit', function (e) {
      e.preventDefault();
      btn.disabled = true;
      fetch('/schedule', {
        method: 'POST',
        headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
        body: 'delay=' + encodeURIComponent(document.getElementById('delay').value),
      })
        .then(function (res) { return res.json().then(function (data) { return { ok: res.ok, data: data }; }); })
        .then(function (result) {
          message.textContent = result.data.message;
          message.className = result.ok ? 'message success' : 'message error';
          btn.disabled = false;
        })
        .catch(function () {
          message.textContent = 'Request failed - please try again.';
          message.className = 'message error';
          btn.disabled = false;
        });
    });
  </script>
</body>
</html>
"#;

/// GET / — render the scheduling form.
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
