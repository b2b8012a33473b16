#![forbid(unsafe_code)]

pub(crate) const APP_CSS: &str = r#":root {
  --bg: #f6f4ef;
  --card: #ffffff;
  --ink: #2b2b2b;
  --muted: #7a7a7a;
  --done: #2e9d5b;
  --skipped: #c98a1b;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  background: var(--bg);
  color: var(--ink);
}

header { padding: 1.5rem 1rem 0.5rem; text-align: center; }
header h1 { margin: 0; font-size: 1.6rem; }
.today { color: var(--muted); margin: 0.25rem 0 0.75rem; }

.owners { display: flex; gap: 0.5rem; justify-content: center; flex-wrap: wrap; }
.owners a {
  padding: 0.35rem 0.9rem;
  border-radius: 999px;
  background: var(--card);
  color: var(--ink);
  text-decoration: none;
  border: 1px solid #ddd;
}
.owners a.current { background: var(--ink); color: var(--card); }

main { display: grid; gap: 1rem; padding: 1rem; max-width: 960px; margin: 0 auto; }
@media (min-width: 720px) { main { grid-template-columns: 1fr 1fr; } }

section h2 { font-size: 1.1rem; margin: 0 0 0.5rem; }
.empty { color: var(--muted); font-style: italic; }
#flash { color: #b3261e; text-align: center; min-height: 1.2em; }

.card {
  background: var(--card);
  border-radius: 12px;
  padding: 0.8rem 1rem;
  margin-bottom: 0.6rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08);
  border-left: 6px solid #ddd;
}
.card.done { border-left-color: var(--done); }
.card.skipped { border-left-color: var(--skipped); }
.card .owner { font-size: 0.8rem; color: var(--muted); }
.card h3 { margin: 0.2rem 0; font-size: 1.05rem; }
.card.done h3, .card.skipped h3 { text-decoration: line-through; color: var(--muted); }
.card .status { font-size: 0.85rem; }
.card .actions { display: flex; gap: 0.4rem; margin-top: 0.5rem; }
.card button { border: 0; border-radius: 8px; padding: 0.35rem 0.8rem; cursor: pointer; }
.card button[data-action="done"] { background: var(--done); color: #fff; }
.card button[data-action="skipped"] { background: var(--skipped); color: #fff; }
.card.pending button[data-action="pending"] { display: none; }
.card.done button[data-action="done"],
.card.done button[data-action="skipped"],
.card.skipped button[data-action="done"],
.card.skipped button[data-action="skipped"] { display: none; }
"#;

pub(crate) const APP_JS: &str = r#""use strict";

const STATUS_TEXT = {
  pending: "Pending",
  done: "Done",
  skipped: "Skipped",
};

document.addEventListener("DOMContentLoaded", () => {
  const active = document.getElementById("active-container");
  const completed = document.getElementById("completed-container");
  const flash = document.getElementById("flash");

  document.querySelectorAll(".card button[data-action]").forEach((button) => {
    button.addEventListener("click", async () => {
      const card = button.closest(".card");
      const status = button.dataset.action;
      flash.textContent = "";
      try {
        await updateStatus(Number(card.dataset.taskId), status);
      } catch (err) {
        flash.textContent = `Could not save: ${err.message}`;
        return;
      }
      applyStatus(card, status);
      (status === "pending" ? active : completed).appendChild(card);
      refreshEmptyStates(active, completed);
    });
  });

  refreshEmptyStates(active, completed);
});

async function updateStatus(taskId, status) {
  const response = await fetch("/api/update_status", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ task_id: taskId, status }),
  });
  let payload = {};
  try {
    payload = await response.json();
  } catch (_) {
    payload = {};
  }
  if (!response.ok || !payload.ok) {
    throw new Error(payload.error || `HTTP ${response.status}`);
  }
}

function applyStatus(card, status) {
  card.classList.remove("pending", "done", "skipped");
  card.classList.add(status);
  card.dataset.status = status;
  const label = card.querySelector(".status");
  if (label) {
    label.textContent = STATUS_TEXT[status] || status;
  }
}

function refreshEmptyStates(active, completed) {
  document.getElementById("active-empty").hidden = active.children.length > 0;
  document.getElementById("completed-empty").hidden = completed.children.length > 0;
}
"#;
