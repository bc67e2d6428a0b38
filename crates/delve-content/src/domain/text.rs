//! Narrative text and action names.

pub const OPENING_SCENE_KEY: &str = "opening";

pub const START: &str = "START";
pub const APPROACH: &str = "Approach";
pub const ENTER_COMBAT: &str = "Enter Combat";
pub const CHECK_PARTY: &str = "Check party";

pub const AWAKENING: &str = "You awaken on a cold, uneven stone floor, the air thick with the \
damp scent of moss and earth. Faint echoes drip from unseen crevices, and the dim glow of \
phosphorescent fungi outlines jagged walls around you. As you rise, the weight of silence \
presses against your ears, broken only by the crunch of gravel beneath your boots. A narrow \
passage leads you forward, its walls narrowing before spilling you into blinding sunlight. \
Shielding your eyes, you step into the open and behold a vast, windswept desert stretching \
endlessly before you. Dominating the horizon stands a colossal pyramid, its golden surface \
shimmering under the sun, ancient and foreboding. The air hums with a strange energy, and a \
faint, unearthly whisper brushes your mind, urging you closer.";

pub const HALT: &str = "\"Halt!\"";
