//! Embedded stylesheet for the single view.
//!
//! Lavender paper-and-ink look lifted from the design: torn-paper cards,
//! pill buttons, floating ambient glyphs, page shake and heart float
//! keyframes. Injected once at mount.

pub const APP_CSS: &str = r#"
html, body {
    margin: 0;
    padding: 0;
    min-height: 100vh;
    background: linear-gradient(160deg, #F2E6FF 0%, #E4D0FF 60%, #F7F0FF 100%);
    font-family: "Nunito", "Segoe UI", sans-serif;
    overflow-x: hidden;
}

#bq-root {
    position: relative;
    min-height: 100vh;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    padding: 2rem 1.5rem;
    box-sizing: border-box;
}

#bq-root.bq-shake {
    animation: bq-page-shake 0.6s ease-in-out;
}

#bq-root.bq-glow {
    background: radial-gradient(circle at 50% 40%, #F7F0FF 0%, #E4D0FF 70%);
}

#bq-ambient {
    position: fixed;
    inset: 0;
    pointer-events: none;
    overflow: hidden;
    z-index: 0;
}

.bq-ambient-item {
    position: absolute;
    user-select: none;
    animation-name: bq-drift;
    animation-iteration-count: infinite;
    animation-timing-function: ease-in-out;
}

#bq-particles {
    position: fixed;
    inset: 0;
    pointer-events: none;
    z-index: 45;
}

#bq-content {
    position: relative;
    z-index: 10;
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 1.5rem;
    text-align: center;
    max-width: 28rem;
}

.bq-card {
    background: #fffdf7;
    border-radius: 4px;
    box-shadow: 0 8px 24px rgba(123, 44, 191, 0.18);
    padding: 1.5rem 2rem;
    transform: rotate(-1deg);
}

.bq-heading {
    font-size: 1.8rem;
    font-weight: 700;
    color: #3A0066;
    line-height: 1.4;
    margin: 0;
}

.bq-prompt {
    font-size: 2.6rem;
    font-weight: 700;
    color: #3A0066;
    line-height: 1.2;
    margin: 0;
}

.bq-sub {
    font-size: 1.1rem;
    font-weight: 600;
    color: #7B2CBF;
    margin: 0;
}

.bq-btn {
    font-weight: 700;
    font-size: 1rem;
    padding: 0.75rem 1.25rem;
    border-radius: 9999px;
    cursor: pointer;
    white-space: nowrap;
    transition: transform 0.12s ease;
}

.bq-btn:hover {
    transform: scale(1.06);
}

.bq-btn-primary {
    background: #7B2CBF;
    color: #fff;
    border: none;
    box-shadow: 0 4px 20px rgba(123, 44, 191, 0.3);
}

.bq-btn-secondary {
    background: #fff;
    color: #7B2CBF;
    border: 2px solid #C8A2FF;
    box-shadow: 0 4px 16px rgba(123, 44, 191, 0.12);
}

.bq-btn-row {
    display: flex;
    gap: 1rem;
    flex-wrap: wrap;
    align-items: center;
    justify-content: center;
    position: relative;
    min-height: 80px;
}

#bq-no {
    transition: transform 0.25s cubic-bezier(0.34, 1.56, 0.64, 1);
}

#bq-yes.bq-pulse {
    animation: bq-pulse 1.5s ease-in-out infinite;
}

.bq-cursor::after {
    content: "|";
    animation: bq-blink 0.9s step-end infinite;
    color: #7B2CBF;
}

#bq-faint {
    position: fixed;
    top: 50%;
    left: 50%;
    transform: translate(-50%, -50%);
    font-size: 5rem;
    font-weight: 800;
    color: rgba(123, 44, 191, 0.08);
    pointer-events: none;
    white-space: nowrap;
    z-index: 1;
}

.bq-toast-top {
    position: fixed;
    top: 1.5rem;
    left: 50%;
    transform: translateX(-50%);
    z-index: 50;
    background: rgba(255, 255, 255, 0.92);
    color: #7B2CBF;
    font-weight: 700;
    font-size: 0.9rem;
    padding: 0.75rem 2rem;
    border-radius: 1rem;
    border: 1px solid rgba(200, 162, 255, 0.5);
    box-shadow: 0 6px 18px rgba(123, 44, 191, 0.15);
    white-space: nowrap;
}

#bq-clicks-toast {
    top: 4.5rem;
}

#bq-flash {
    position: fixed;
    bottom: 2.5rem;
    left: 50%;
    transform: translateX(-50%);
    z-index: 50;
    color: #7B2CBF;
    font-weight: 700;
    font-size: 1.25rem;
    font-style: italic;
    letter-spacing: 0.04em;
    pointer-events: none;
    white-space: nowrap;
    text-shadow: 0 2px 6px rgba(123, 44, 191, 0.25);
}

.bq-drum-bars {
    display: flex;
    gap: 0.5rem;
    align-items: flex-end;
    justify-content: center;
    height: 2.5rem;
}

.bq-drum-bar {
    width: 10px;
    height: 32px;
    border-radius: 6px;
    background: #7B2CBF;
    transform-origin: bottom;
    opacity: 0.25;
    transition: opacity 0.2s ease;
}

.bq-drum-bar.bq-live {
    opacity: 1;
    animation: bq-bar-bounce 0.3s ease-in-out;
}

.bq-drum-emoji {
    font-size: 4.5rem;
    animation: bq-wobble 0.4s ease-in-out infinite;
}

.bq-heart {
    position: fixed;
    bottom: 0;
    font-size: 1.5rem;
    pointer-events: none;
    z-index: 40;
    animation: bq-heart-float 5s ease-in forwards;
}

@keyframes bq-drift {
    0%   { transform: translate(0, 0) rotate(0deg); opacity: 0.3; }
    25%  { transform: translate(8px, -20px) rotate(10deg); opacity: 0.6; }
    50%  { transform: translate(-5px, -8px) rotate(-5deg); opacity: 0.4; }
    75%  { transform: translate(10px, -25px) rotate(8deg); opacity: 0.7; }
    100% { transform: translate(0, 0) rotate(0deg); opacity: 0.3; }
}

@keyframes bq-blink {
    50% { opacity: 0; }
}

@keyframes bq-pulse {
    0%, 100% { transform: scale(1); box-shadow: 0 0 0 rgba(123, 44, 191, 0.3); }
    50%      { transform: scale(1.05); box-shadow: 0 0 25px rgba(123, 44, 191, 0.6); }
}

@keyframes bq-page-shake {
    0%, 100% { transform: translate(0, 0); }
    20% { transform: translate(-8px, 3px); }
    40% { transform: translate(7px, -4px); }
    60% { transform: translate(-6px, 2px); }
    80% { transform: translate(5px, -2px); }
}

@keyframes bq-wobble {
    0%, 100% { transform: rotate(0deg); }
    25% { transform: rotate(-8deg); }
    75% { transform: rotate(8deg); }
}

@keyframes bq-bar-bounce {
    0%, 100% { transform: scaleY(1); }
    50%      { transform: scaleY(2.5); }
}

@keyframes bq-heart-float {
    0%   { transform: translateY(0); opacity: 0; }
    10%  { opacity: 1; }
    100% { transform: translateY(-110vh); opacity: 0; }
}
"#;
