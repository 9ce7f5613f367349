use crate::analytics::{MAX_SCORE, MIN_SCORE, MoodCategory};
use serde_json::json;

pub fn render_index(date: &str) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{TIERS}}", &tier_table().to_string())
}

/// Category bands the page uses to pick the live emoji on the score slider.
fn tier_table() -> serde_json::Value {
    let tiers: Vec<_> = MoodCategory::ALL
        .into_iter()
        .map(|category| {
            json!({
                "category": category,
                "emoji": category.emoji(),
                "upper": category.upper_fraction(),
            })
        })
        .collect();
    json!({ "min": MIN_SCORE, "max": MAX_SCORE, "tiers": tiers })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2f6;
      --bg-2: #c9d8ea;
      --ink: #26303a;
      --accent: #5b6ee1;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4ecf7 60%, #f4f7fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    form.entry {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 14px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
    }

    input[type="text"] {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(91, 110, 225, 0.3);
    }

    .calendar {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .day {
      width: 44px;
      height: 44px;
      border-radius: 12px;
      display: grid;
      place-items: center;
      font-size: 1.2rem;
    }

    .day.red { background: #fecaca; }
    .day.yellow { background: #fef08a; }
    .day.blue { background: #bfdbfe; }
    .day.green { background: #bbf7d0; }

    .status {
      min-height: 1.2em;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Tracker</h1>
      <p class="subtitle">Today is <span id="date">{{DATE}}</span>. Log how you feel and watch the trend.</p>
    </header>

    <label>User
      <input id="user" type="text" placeholder="your user id" />
    </label>

    <form class="entry" id="entry-form">
      <label>General feeling <span id="gf-emoji"></span>
        <input name="general_feeling" type="range" min="1" max="10" value="5" />
      </label>
      <label>Anxiety / optimism
        <input name="anxiety_optimism" type="range" min="1" max="10" value="5" />
      </label>
      <label>Activity level
        <input name="activity_level" type="range" min="1" max="10" value="5" />
      </label>
      <label>Sleep quality
        <input name="sleep_quality" type="range" min="1" max="10" value="5" />
      </label>
      <label>Social interaction
        <input name="social_interaction" type="range" min="1" max="10" value="5" />
      </label>
      <label>Took medication
        <input name="took_medication" type="checkbox" />
      </label>
      <label>Note
        <input name="note" type="text" />
      </label>
      <button type="submit">Save entry</button>
    </form>

    <section class="panel">
      <div class="stat">
        <span class="label">Prediction</span>
        <span id="prediction" class="value">-</span>
      </div>
      <div class="stat">
        <span class="label">7-day average</span>
        <span id="average" class="value">-</span>
      </div>
      <div class="stat">
        <span class="label">Best / worst</span>
        <span id="range" class="value">-</span>
      </div>
      <div class="stat">
        <span class="label">Trend</span>
        <span id="trend" class="value">-</span>
      </div>
    </section>

    <section>
      <h2>History</h2>
      <div id="calendar" class="calendar"></div>
    </section>

    <div id="status" class="status"></div>
  </main>

  <script>
    const userInput = document.getElementById('user');
    const statusEl = document.getElementById('status');
    const form = document.getElementById('entry-form');
    const scale = {{TIERS}};

    userInput.value = localStorage.getItem('moodUser') || '';
    userInput.addEventListener('change', () => {
      localStorage.setItem('moodUser', userInput.value.trim());
      refresh().catch((err) => setStatus(err.message, 'error'));
    });

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options = {}) => {
      const headers = Object.assign({ 'x-user-id': userInput.value.trim() }, options.headers || {});
      const res = await fetch(path, Object.assign({}, options, { headers }));
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const tierEmoji = (value) => {
      const fraction = (value - scale.min) / (scale.max - scale.min);
      const tier = scale.tiers.find((t) => t.upper === null || fraction <= t.upper);
      return tier.emoji;
    };

    const feeling = form.elements.general_feeling;
    const showEmoji = () => {
      document.getElementById('gf-emoji').textContent = tierEmoji(Number(feeling.value));
    };
    feeling.addEventListener('input', showEmoji);
    showEmoji();

    const loadInsights = async () => {
      const data = await api('/api/moods/insights');
      document.getElementById('prediction').textContent = data.prediction.toFixed(1);
      const insights = data.insights;
      document.getElementById('average').textContent = insights ? insights.average_mood.toFixed(2) : '-';
      document.getElementById('range').textContent = insights ? `${insights.best_day} / ${insights.worst_day}` : '-';
      document.getElementById('trend').textContent = insights ? insights.trend : '-';
    };

    const loadCalendar = async () => {
      const days = await api('/api/moods/calendar');
      const calendar = document.getElementById('calendar');
      calendar.innerHTML = '';
      days.forEach((day) => {
        const cell = document.createElement('div');
        cell.className = `day ${day.color}`;
        cell.title = `${day.date}: ${day.score} (${day.category})`;
        cell.textContent = day.emoji;
        calendar.appendChild(cell);
      });
    };

    const refresh = async () => {
      if (!userInput.value.trim()) {
        setStatus('Enter a user id to load your history', 'info');
        return;
      }
      await Promise.all([loadInsights(), loadCalendar()]);
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const fields = form.elements;
      const body = {
        general_feeling: Number(fields.general_feeling.value),
        anxiety_optimism: Number(fields.anxiety_optimism.value),
        activity_level: Number(fields.activity_level.value),
        sleep_quality: Number(fields.sleep_quality.value),
        social_interaction: Number(fields.social_interaction.value),
        took_medication: fields.took_medication.checked,
        note: fields.note.value || null
      };
      setStatus('Saving...', 'info');
      api('/api/moods', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      })
        .then(() => refresh())
        .then(() => setStatus('Saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_embeds_the_date() {
        let page = render_index("2026-10-17");
        assert!(page.contains("<span id=\"date\">2026-10-17</span>"));
        assert!(!page.contains("{{DATE}}"));
    }

    #[test]
    fn index_embeds_tier_table_matching_categorize() {
        let page = render_index("2026-10-17");
        assert!(!page.contains("{{TIERS}}"));

        let marker = "const scale = ";
        let start = page.find(marker).unwrap() + marker.len();
        let end = start + page[start..].find(";\n").unwrap();
        let table: serde_json::Value = serde_json::from_str(&page[start..end]).unwrap();

        let tiers = table["tiers"].as_array().unwrap();
        assert_eq!(tiers.len(), MoodCategory::ALL.len());
        assert_eq!(tiers[0]["category"], "angry");
        assert!(tiers[3]["upper"].is_null());

        // Same lookup the page script does, for every slider position.
        let (min, max) = (table["min"].as_f64().unwrap(), table["max"].as_f64().unwrap());
        for score in 1..=10 {
            let score = f64::from(score);
            let fraction = (score - min) / (max - min);
            let tier = tiers
                .iter()
                .find(|t| t["upper"].as_f64().is_none_or(|upper| fraction <= upper))
                .unwrap();
            assert_eq!(tier["emoji"], crate::analytics::categorize(score).emoji());
        }
    }
}
