//! Static seed data: the community list, the episode catalog, and a few
//! starter posts. Loaded on first run and whenever a collection is missing
//! from a persisted blob.

use chrono::{TimeZone, Utc};
use hh_core::models::{
    Comment, Community, Episode, ForumPost, PostKind, Review, Universe,
};

/// Usernames that appear in seed content without ever having logged in.
/// Profile lookups for these synthesize a placeholder record.
pub const SEED_AUTHORS: &[&str] = &["RadioDemon", "Vox", "Velvette", "Blitzo", "AngelDust"];

pub fn communities() -> Vec<Community> {
    let plain = |id: &str, name: &str, description: &str, icon: &str, color: &str| Community {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        creator_id: None,
        moderators: vec![],
        member_count: 0,
    };
    vec![
        plain(
            "all",
            "r/All",
            "The screams of everyone combined.",
            "🌐",
            "text-white",
        ),
        plain(
            "overlords",
            "r/Overlords",
            "Exclusive club for the powerful. If you have to ask, you don't belong.",
            "👑",
            "text-neon-red",
        ),
        plain(
            "imp",
            "r/IMP",
            "Immediate Murder Professionals. Client requests & weapon sales.",
            "🔫",
            "text-neon-red",
        ),
        plain(
            "sinners",
            "r/Sinners",
            "General chat for the damned. Rants, drama, and extermination tips.",
            "🔥",
            "text-neon-blue",
        ),
        plain(
            "hazbin",
            "r/HazbinHotel",
            "Redemption is possible! (Maybe). Discuss Charlie's project.",
            "🏨",
            "text-neon-pink",
        ),
        plain(
            "tech",
            "r/VoxTek",
            "Support forum for VoxTek products. All hail Vox.",
            "📺",
            "text-neon-blue",
        ),
    ]
}

pub fn episodes() -> Vec<Episode> {
    let review = |id: &str, user: &str, rating: u8, comment: &str, when: &str| Review {
        id: id.to_string(),
        user: user.to_string(),
        user_avatar: None,
        rating,
        comment: Some(comment.to_string()),
        timestamp: when.to_string(),
    };
    vec![
        Episode {
            id: "h1".to_string(),
            universe: Universe::Hazbin,
            season: 1,
            number: 1,
            title: "Pilot".to_string(),
            thumbnail: "https://static.wikia.nocookie.net/hazbinhotel/images/5/5a/Pilot_Screenshot.png".to_string(),
            video_url: "https://www.youtube.com/embed/Zlmswo0S0e0".to_string(),
            synopsis: "Charlie Morningstar tries to realize her dream of redeeming sinners, but Hell remains skeptical.".to_string(),
            reviews: vec![
                review("r1", "VaggieLover", 10, "A perfect start!", "1 day ago"),
                review("r2", "RadioHater", 2, "Too many songs.", "2 days ago"),
            ],
            comments: vec![],
        },
        Episode {
            id: "h2".to_string(),
            universe: Universe::Hazbin,
            season: 1,
            number: 2,
            title: "Radio Killed the Video Star".to_string(),
            thumbnail: "https://static.wikia.nocookie.net/hazbinhotel/images/a/a3/Vox_Pilot.png".to_string(),
            video_url: "https://www.youtube.com/embed/8lQM0y608g8".to_string(),
            synopsis: "Old media against new technology. Alastor bares his teeth and Vox loses the signal.".to_string(),
            reviews: vec![review("r3", "VoxTech_Official", 1, "TOTAL GARBAGE. STATIC ON THE AIR.", "1 hour ago")],
            comments: vec![],
        },
        Episode {
            id: "hb1".to_string(),
            universe: Universe::Helluva,
            season: 1,
            number: 1,
            title: "Murder Family".to_string(),
            thumbnail: "https://static.wikia.nocookie.net/helluvaboss/images/5/55/Murder_Family.png".to_string(),
            video_url: "https://www.youtube.com/embed/el_PChGfJN8".to_string(),
            synopsis: "Blitzo and company head to Earth to take out a target and run into a family of maniacs.".to_string(),
            reviews: vec![review("r4", "Moxxie", 7, "That was a bit violent, sir.", "1 year ago")],
            comments: vec![],
        },
        Episode {
            id: "hb2".to_string(),
            universe: Universe::Helluva,
            season: 1,
            number: 2,
            title: "Loo Loo Land".to_string(),
            thumbnail: "https://static.wikia.nocookie.net/helluvaboss/images/1/19/Loo_Loo_Land.png".to_string(),
            video_url: "https://www.youtube.com/embed/kpnwWgxEGLI".to_string(),
            synopsis: "Octavia and Stolas try to patch things up at an amusement park.".to_string(),
            reviews: vec![review("r5", "Octavia_Goetia", 9, "I hate this park, but dad tried.", "5 months ago")],
            comments: vec![],
        },
        Episode {
            id: "hb3".to_string(),
            universe: Universe::Helluva,
            season: 2,
            number: 6,
            title: "Oops".to_string(),
            thumbnail: "https://static.wikia.nocookie.net/helluvaboss/images/e/e8/Oops.jpg".to_string(),
            video_url: "https://www.youtube.com/embed/h2Zp7_VbUYE".to_string(),
            synopsis: "Fizzarolli and Blitzo end up trapped together and have to sort out their history.".to_string(),
            reviews: vec![review("r6", "Asmodeus", 10, "My Fizzy was magnificent!", "1 week ago")],
            comments: vec![],
        },
    ]
}

pub fn posts() -> Vec<ForumPost> {
    let base = |id: &str, community: &str, author: &str, avatar: &str| ForumPost {
        id: id.to_string(),
        community_id: community.to_string(),
        author: author.to_string(),
        avatar: avatar.to_string(),
        title: String::new(),
        content: String::new(),
        kind: PostKind::Text,
        image: None,
        link_url: None,
        poll_options: None,
        poll_total_votes: 0,
        is_nsfw: false,
        is_spoiler: false,
        is_pinned: false,
        likes: 0,
        replies: 0,
        tags: vec![],
        timestamp: Utc::now(),
        comments: vec![],
        awards: 0,
        awarded_by: vec![],
    };
    let comment = |id: &str,
                   parent: Option<&str>,
                   author: &str,
                   avatar: &str,
                   content: &str,
                   likes: i64,
                   (h, m): (u32, u32)| Comment {
        id: id.to_string(),
        parent_id: parent.map(str::to_string),
        author: author.to_string(),
        avatar: avatar.to_string(),
        content: content.to_string(),
        likes,
        timestamp: Utc.with_ymd_and_hms(2024, 5, 20, h, m, 0).unwrap(),
        is_op: false,
    };

    const ALASTOR_PNG: &str = "https://upload.wikimedia.org/wikipedia/en/e/e2/Alastor_Hazbin_Hotel.png";
    const ANGEL_PNG: &str = "https://upload.wikimedia.org/wikipedia/en/2/24/Angel_Dust_Hazbin_Hotel.png";
    const VOX_PNG: &str = "https://static.wikia.nocookie.net/hazbinhotel/images/c/c2/Vox_App.png";

    let mut p1 = base("p1", "overlords", "RadioDemon", ALASTOR_PNG);
    p1.title = "On the mediocrity of modern television".to_string();
    p1.content = "Pictures are for the feeble-minded! True horror and delight live in the radio waves. Who even watches that box of images?".to_string();
    p1.likes = 666;
    p1.tags = vec!["Opinion".to_string(), "Radio".to_string(), "Classic".to_string()];
    p1.timestamp = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
    p1.comments = vec![
        comment("c1", None, "AngelDust", ANGEL_PNG, "Oh my, the drama! 🍿 Keep going, I'm taking notes.", 69, (12, 5)),
        {
            let mut c = comment("c2", Some("c1"), "RadioDemon", ALASTOR_PNG, "Keep your paws off the keyboard, you effeminate spider.", 120, (12, 7));
            c.is_op = true;
            c
        },
        comment("c3", None, "Vox", VOX_PNG, "Your time is over, old man. The future belongs to screens.", -50, (12, 9)),
    ];
    p1.replies = p1.comments.len() as u32;

    let mut p2 = base(
        "p2",
        "overlords",
        "Velvette",
        "https://static.wikia.nocookie.net/hazbinhotel/images/e/e5/Velvette_profile.png",
    );
    p2.title = "#VeesMeeting: The fashion show was a disaster".to_string();
    p2.content = "If I see one more boring coat I will scream. @Carmilla teach your daughters to dress.".to_string();
    p2.kind = PostKind::Image;
    p2.image = Some("https://i.pinimg.com/736x/d3/5a/52/d35a522147759987c661f4339600988c.jpg".to_string());
    p2.likes = 8900;
    p2.tags = vec!["Fashion".to_string(), "Rant".to_string(), "Vees".to_string()];
    p2.timestamp = Utc.with_ymd_and_hms(2024, 5, 20, 14, 0, 0).unwrap();

    let mut p3 = base(
        "p3",
        "imp",
        "Blitzo",
        "https://upload.wikimedia.org/wikipedia/en/0/04/Blitzo_Helluva_Boss.png",
    );
    p3.title = "WEAPONS SALE! LOOKING FOR CLIENTS!".to_string();
    p3.content = "Got an ex that needs to disappear, or a boss who drives you mad? Call I.M.P! 50% off if the target is a clown.".to_string();
    p3.likes = 42;
    p3.tags = vec!["Business".to_string(), "Murder".to_string(), "Horses".to_string()];
    p3.timestamp = Utc.with_ymd_and_hms(2024, 5, 21, 9, 0, 0).unwrap();

    let mut p4 = base("p4", "tech", "Vox", VOX_PNG);
    p4.title = "VoxTek Drone v7.0 Update Log".to_string();
    p4.content = "Improved surveillance range by 500%. Now with automated soul-tracking algorithms. Trust us with your safety.".to_string();
    p4.likes = 15000;
    p4.tags = vec!["Tech".to_string(), "Update".to_string(), "TrustUs".to_string()];
    p4.timestamp = Utc.with_ymd_and_hms(2024, 5, 21, 10, 30, 0).unwrap();

    vec![p1, p2, p3, p4]
}
