//! Sound effects and background music.
//!
//! Every file is optional. Whatever is present under `<assets>/sounds/`
//! is loaded at start-up; the rest is skipped.

use std::collections::HashMap;

use bevy::audio::Volume;
use bevy::prelude::*;

use asteroid_dodger::game::events::DestroyCause;
use asteroid_dodger::game::ship::DamageOutcome;
use asteroid_dodger::GameEvent;

use crate::game::SimEvent;
use crate::records::Records;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<Sounds>()
            .add_systems(Startup, load_sounds)
            .add_systems(Update, (
                play_event_sounds,
                sync_music_volume.run_if(resource_changed::<Records>),
            ));
    }
}

/// One-shot sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Laser,
    Explosion,
    ExplosionBig,
    Hit,
    PowerUp,
    Shield,
    BossWarning,
}

impl SoundId {
    pub const ALL: [SoundId; 7] = [
        SoundId::Laser,
        SoundId::Explosion,
        SoundId::ExplosionBig,
        SoundId::Hit,
        SoundId::PowerUp,
        SoundId::Shield,
        SoundId::BossWarning,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundId::Laser => "laser.wav",
            SoundId::Explosion => "explosion.wav",
            SoundId::ExplosionBig => "explosion_big.wav",
            SoundId::Hit => "hit.wav",
            SoundId::PowerUp => "powerup.wav",
            SoundId::Shield => "shield.wav",
            SoundId::BossWarning => "boss_warning.wav",
        }
    }
}

const MUSIC_FILE: &str = "music.wav";

/// The sound an event makes, if any.
pub fn sound_for(event: &GameEvent) -> Option<SoundId> {
    match event {
        GameEvent::LaserFired { .. } => Some(SoundId::Laser),
        GameEvent::AsteroidDestroyed { cause: DestroyCause::Laser, .. } => Some(SoundId::Explosion),
        GameEvent::ShipHit { outcome, .. } => match outcome {
            DamageOutcome::ShieldAbsorbed => Some(SoundId::Shield),
            DamageOutcome::Destroyed => None,
            DamageOutcome::Damaged | DamageOutcome::Ignored => Some(SoundId::Hit),
        },
        GameEvent::PowerUpCollected { .. } => Some(SoundId::PowerUp),
        GameEvent::BossWarning { .. } => Some(SoundId::BossWarning),
        GameEvent::BossDefeated { .. } => Some(SoundId::ExplosionBig),
        _ => None,
    }
}

/// Loaded sound handles.
#[derive(Resource, Default)]
pub struct Sounds {
    effects: HashMap<SoundId, Handle<AudioSource>>,
}

impl Sounds {
    pub fn get(&self, id: SoundId) -> Option<&Handle<AudioSource>> {
        self.effects.get(&id)
    }
}

/// Marker for the looping music entity.
#[derive(Component)]
pub struct MusicTrack;

fn load_sounds(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    records: Res<Records>,
    mut sounds: ResMut<Sounds>,
) {
    let dir = records.config.sounds_dir();

    for id in SoundId::ALL {
        if dir.join(id.file_name()).exists() {
            let handle = asset_server.load(format!("sounds/{}", id.file_name()));
            sounds.effects.insert(id, handle);
        }
    }

    if sounds.effects.is_empty() {
        info!("No sound files in {}, running silently", dir.display());
        return;
    }
    info!("Loaded {}/{} sound effects", sounds.effects.len(), SoundId::ALL.len());

    if dir.join(MUSIC_FILE).exists() {
        commands.spawn((
            AudioPlayer::new(asset_server.load(format!("sounds/{}", MUSIC_FILE))),
            PlaybackSettings::LOOP.with_volume(Volume::new(records.settings.effective_volume())),
            MusicTrack,
        ));
        info!("Background music loaded");
    }
}

fn play_event_sounds(
    mut commands: Commands,
    mut events: EventReader<SimEvent>,
    sounds: Res<Sounds>,
    records: Res<Records>,
) {
    let volume = records.settings.effective_volume();

    for SimEvent(event) in events.read() {
        if volume <= 0.0 {
            continue;
        }
        let Some(handle) = sound_for(event).and_then(|id| sounds.get(id)) else {
            continue;
        };
        commands.spawn((
            AudioPlayer::new(handle.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::new(volume)),
        ));
    }
}

fn sync_music_volume(records: Res<Records>, music: Query<&AudioSink, With<MusicTrack>>) {
    for sink in music.iter() {
        sink.set_volume(records.settings.effective_volume());
    }
}
