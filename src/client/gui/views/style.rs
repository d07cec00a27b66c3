// Palette and container appearances shared by the studio views
use iced::Color;
use iced::Font;

pub const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18); // Deep navy
pub const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36); // Muted indigo for card bodies
pub const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);
pub const ACCENT_COLOR: Color = Color::from_rgb(0.0, 0.7, 0.3);
pub const ERROR_COLOR: Color = Color::from_rgb(1.0, 0.35, 0.35);
pub const WARNING_COLOR: Color = Color::from_rgb(1.0, 0.8, 0.0);
pub const TEXT_PRIMARY: Color = Color::WHITE;
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

pub const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn bg_main_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn card_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 16.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 12.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
        },
    }
}

pub fn input_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(INPUT_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 1.0,
            color: Color::from_rgb(0.3, 0.3, 0.4),
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

// White canvas behind the rendered SVG so dark strokes stay readable
pub fn diagram_surface_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(Color::WHITE)),
        text_color: Some(Color::BLACK),
        border: iced::Border {
            width: 1.0,
            color: Color::from_rgb(0.69, 0.77, 0.87),
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}
