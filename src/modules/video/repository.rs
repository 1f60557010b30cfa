use super::gateway::{GatewayResult, VideoGateway};
use super::media::{AudioVideoMedia, ImageMedia};
use super::model::{Pagination, Rating, Video, VideoMetadata, VideoPreview, VideoSearchQuery};
use crate::common::error::AppError;
use crate::infrastructure::db::pool::DbPool;
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{FromRow, PgConnection};
use std::collections::{HashMap, HashSet};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct VideoRow {
    id: Uuid,
    title: String,
    description: String,
    launched_at: i32,
    duration: f64,
    opened: bool,
    published: bool,
    rating: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    video_id: Option<String>,
    trailer_id: Option<String>,
    banner_id: Option<String>,
    thumbnail_id: Option<String>,
    thumbnail_half_id: Option<String>,
}

impl VideoRow {
    fn metadata(&self) -> GatewayResult<VideoMetadata> {
        let rating: Rating = self.rating.parse().map_err(|e: String| anyhow!(e))?;
        Ok(VideoMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            launched_at: self.launched_at,
            duration: self.duration,
            opened: self.opened,
            published: self.published,
            rating,
        })
    }

    fn audio_video_ids(&self) -> Vec<String> {
        [&self.video_id, &self.trailer_id].into_iter().flatten().cloned().collect()
    }

    fn image_ids(&self) -> Vec<String> {
        [&self.banner_id, &self.thumbnail_id, &self.thumbnail_half_id]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

#[derive(Debug, FromRow)]
struct AudioVideoMediaRow {
    id: String,
    checksum: String,
    name: String,
    file_path: String,
    encoded_path: Option<String>,
    media_status: String,
}

impl TryFrom<AudioVideoMediaRow> for AudioVideoMedia {
    type Error = AppError;

    fn try_from(row: AudioVideoMediaRow) -> Result<Self, Self::Error> {
        Ok(AudioVideoMedia {
            id: row.id,
            checksum: row.checksum,
            name: row.name,
            raw_location: row.file_path,
            encoded_location: row.encoded_path.filter(|p| !p.is_empty()),
            status: row.media_status.parse().map_err(|e: String| anyhow!(e))?,
        })
    }
}

#[derive(Debug, FromRow)]
struct ImageMediaRow {
    id: String,
    checksum: String,
    name: String,
    file_path: String,
}

impl From<ImageMediaRow> for ImageMedia {
    fn from(row: ImageMediaRow) -> Self {
        ImageMedia {
            id: row.id,
            checksum: row.checksum,
            name: row.name,
            location: row.file_path,
        }
    }
}

/// (table, column) of each relation set.
const CATEGORIES: (&str, &str) = ("videos_categories", "category_id");
const GENRES: (&str, &str) = ("videos_genres", "genre_id");
const CAST_MEMBERS: (&str, &str) = ("videos_cast_members", "cast_member_id");

const VIDEO_COLUMNS: &str = "id, title, description, launched_at, duration, opened, published, rating, \
     created_at, updated_at, video_id, trailer_id, banner_id, thumbnail_id, thumbnail_half_id";

/// ILIKE pattern matching `terms` anywhere, with LIKE wildcards in the input taken literally.
fn contains_pattern(terms: &str) -> String {
    let escaped = terms
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[derive(Clone)]
pub struct VideoRepository {
    pool: DbPool,
}

impl VideoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_row(conn: &mut PgConnection, id: Uuid, lock: bool) -> GatewayResult<Option<VideoRow>> {
        let sql = format!(
            "SELECT {} FROM videos WHERE id = $1{}",
            VIDEO_COLUMNS,
            if lock { " FOR UPDATE" } else { "" }
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn upsert_audio_video(conn: &mut PgConnection, media: &AudioVideoMedia) -> GatewayResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos_video_media (id, checksum, name, file_path, encoded_path, media_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                checksum = EXCLUDED.checksum,
                name = EXCLUDED.name,
                file_path = EXCLUDED.file_path,
                encoded_path = EXCLUDED.encoded_path,
                media_status = EXCLUDED.media_status
            "#,
        )
        .bind(&media.id)
        .bind(&media.checksum)
        .bind(&media.name)
        .bind(&media.raw_location)
        .bind(&media.encoded_location)
        .bind(media.status.as_str())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_image(conn: &mut PgConnection, media: &ImageMedia) -> GatewayResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos_image_media (id, checksum, name, file_path)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                checksum = EXCLUDED.checksum,
                name = EXCLUDED.name,
                file_path = EXCLUDED.file_path
            "#,
        )
        .bind(&media.id)
        .bind(&media.checksum)
        .bind(&media.name)
        .bind(&media.location)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn replace_relation(
        conn: &mut PgConnection,
        (table, column): (&str, &str),
        video_id: Uuid,
        ids: &HashSet<Uuid>,
    ) -> GatewayResult<()> {
        sqlx::query(&format!("DELETE FROM {} WHERE video_id = $1", table))
            .bind(video_id)
            .execute(&mut *conn)
            .await?;

        if !ids.is_empty() {
            let ids: Vec<Uuid> = ids.iter().copied().collect();
            sqlx::query(&format!(
                "INSERT INTO {} (video_id, {}) SELECT $1, unnest($2::uuid[]) ON CONFLICT DO NOTHING",
                table, column
            ))
            .bind(video_id)
            .bind(&ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn load_relation(
        conn: &mut PgConnection,
        (table, column): (&str, &str),
        video_id: Uuid,
    ) -> GatewayResult<HashSet<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(&format!("SELECT {} FROM {} WHERE video_id = $1", column, table))
            .bind(video_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Media rows the stored row points at but the new state no longer does.
    async fn delete_media(conn: &mut PgConnection, audio_video_ids: &[String], image_ids: &[String]) -> GatewayResult<()> {
        if !audio_video_ids.is_empty() {
            sqlx::query("DELETE FROM videos_video_media WHERE id = ANY($1)")
                .bind(audio_video_ids)
                .execute(&mut *conn)
                .await?;
        }
        if !image_ids.is_empty() {
            sqlx::query("DELETE FROM videos_image_media WHERE id = ANY($1)")
                .bind(image_ids)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    async fn hydrate(conn: &mut PgConnection, row: VideoRow) -> GatewayResult<Video> {
        let audio_video_ids = row.audio_video_ids();
        let audio_videos: HashMap<String, AudioVideoMedia> = sqlx::query_as::<_, AudioVideoMediaRow>(
            "SELECT id, checksum, name, file_path, encoded_path, media_status FROM videos_video_media WHERE id = ANY($1)",
        )
        .bind(&audio_video_ids)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|r| AudioVideoMedia::try_from(r).map(|m| (m.id.clone(), m)))
        .collect::<Result<HashMap<_, _>, _>>()?;

        let image_ids = row.image_ids();
        let images: HashMap<String, ImageMedia> = sqlx::query_as::<_, ImageMediaRow>(
            "SELECT id, checksum, name, file_path FROM videos_image_media WHERE id = ANY($1)",
        )
        .bind(&image_ids)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|r| (r.id.clone(), ImageMedia::from(r)))
        .collect();

        let categories = Self::load_relation(conn, CATEGORIES, row.id).await?;
        let genres = Self::load_relation(conn, GENRES, row.id).await?;
        let cast_members = Self::load_relation(conn, CAST_MEMBERS, row.id).await?;

        let metadata = row.metadata()?;

        Ok(Video::with(
            row.id,
            metadata,
            row.created_at,
            row.updated_at,
            categories,
            genres,
            cast_members,
            row.video_id.and_then(|id| audio_videos.get(&id).cloned()),
            row.trailer_id.and_then(|id| audio_videos.get(&id).cloned()),
            row.banner_id.and_then(|id| images.get(&id).cloned()),
            row.thumbnail_id.and_then(|id| images.get(&id).cloned()),
            row.thumbnail_half_id.and_then(|id| images.get(&id).cloned()),
        ))
    }
}

#[async_trait]
impl VideoGateway for VideoRepository {
    async fn create(&self, video: Video) -> GatewayResult<Video> {
        self.save(video).await
    }

    async fn save(&self, video: Video) -> GatewayResult<Video> {
        let mut tx = self.pool.begin().await?;

        let previous = Self::fetch_row(&mut tx, video.id(), true).await?;

        for media in [video.video(), video.trailer()].into_iter().flatten() {
            Self::upsert_audio_video(&mut tx, media).await?;
        }
        for media in [video.banner(), video.thumbnail(), video.thumbnail_half()].into_iter().flatten() {
            Self::upsert_image(&mut tx, media).await?;
        }

        let metadata = video.metadata();
        let media_id = |m: Option<&AudioVideoMedia>| m.map(|m| m.id.clone());
        let image_id = |m: Option<&ImageMedia>| m.map(|m| m.id.clone());

        sqlx::query(
            r#"
            INSERT INTO videos (id, title, description, launched_at, duration, opened, published, rating,
                                created_at, updated_at, video_id, trailer_id, banner_id, thumbnail_id, thumbnail_half_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                launched_at = EXCLUDED.launched_at,
                duration = EXCLUDED.duration,
                opened = EXCLUDED.opened,
                published = EXCLUDED.published,
                rating = EXCLUDED.rating,
                updated_at = EXCLUDED.updated_at,
                video_id = EXCLUDED.video_id,
                trailer_id = EXCLUDED.trailer_id,
                banner_id = EXCLUDED.banner_id,
                thumbnail_id = EXCLUDED.thumbnail_id,
                thumbnail_half_id = EXCLUDED.thumbnail_half_id
            "#,
        )
        .bind(video.id())
        .bind(&metadata.title)
        .bind(&metadata.description)
        .bind(metadata.launched_at)
        .bind(metadata.duration)
        .bind(metadata.opened)
        .bind(metadata.published)
        .bind(metadata.rating.as_str())
        .bind(video.created_at())
        .bind(video.updated_at())
        .bind(media_id(video.video()))
        .bind(media_id(video.trailer()))
        .bind(image_id(video.banner()))
        .bind(image_id(video.thumbnail()))
        .bind(image_id(video.thumbnail_half()))
        .execute(&mut *tx)
        .await?;

        if let Some(previous) = previous {
            let kept_audio_video: HashSet<String> =
                [media_id(video.video()), media_id(video.trailer())].into_iter().flatten().collect();
            let kept_images: HashSet<String> = [
                image_id(video.banner()),
                image_id(video.thumbnail()),
                image_id(video.thumbnail_half()),
            ]
            .into_iter()
            .flatten()
            .collect();

            let stale_audio_video: Vec<String> = previous
                .audio_video_ids()
                .into_iter()
                .filter(|id| !kept_audio_video.contains(id))
                .collect();
            let stale_images: Vec<String> = previous
                .image_ids()
                .into_iter()
                .filter(|id| !kept_images.contains(id))
                .collect();
            Self::delete_media(&mut tx, &stale_audio_video, &stale_images).await?;
        }

        Self::replace_relation(&mut tx, CATEGORIES, video.id(), video.categories()).await?;
        Self::replace_relation(&mut tx, GENRES, video.id(), video.genres()).await?;
        Self::replace_relation(&mut tx, CAST_MEMBERS, video.id(), video.cast_members()).await?;

        tx.commit().await?;
        debug!(video_id = %video.id(), "video saved");
        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> GatewayResult<Option<Video>> {
        let mut conn = self.pool.acquire().await?;

        match Self::fetch_row(&mut conn, id, false).await? {
            Some(row) => Ok(Some(Self::hydrate(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> GatewayResult<()> {
        let mut tx = self.pool.begin().await?;

        if let Some(row) = Self::fetch_row(&mut tx, id, true).await? {
            sqlx::query("DELETE FROM videos WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::delete_media(&mut tx, &row.audio_video_ids(), &row.image_ids()).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_all(&self, query: &VideoSearchQuery) -> GatewayResult<Pagination<VideoPreview>> {
        let pattern = query
            .terms
            .as_ref()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(contains_pattern);
        let offset = i64::from(query.page) * i64::from(query.per_page);

        let items = sqlx::query_as::<_, (Uuid, String, String, OffsetDateTime, OffsetDateTime)>(
            r#"
            SELECT id, title, description, created_at, updated_at
            FROM videos
            WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(i64::from(query.per_page))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(id, title, description, created_at, updated_at)| VideoPreview {
            id,
            title,
            description,
            created_at,
            updated_at,
        })
        .collect();

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM videos WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\')"#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(Pagination {
            current_page: query.page,
            per_page: query.per_page,
            total: total.max(0) as u64,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::pool::{connect_to_db, run_migrations};
    use crate::modules::video::media::{MediaKind, MediaStatus};
    use assert_matches::assert_matches;

    fn metadata(title: &str) -> VideoMetadata {
        VideoMetadata {
            title: title.to_string(),
            description: "Stored in Postgres".to_string(),
            launched_at: 2010,
            duration: 148.0,
            opened: true,
            published: false,
            rating: Rating::Age12,
        }
    }

    fn ids(n: usize) -> HashSet<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn media_row(status: &str, encoded_path: Option<&str>) -> AudioVideoMediaRow {
        AudioVideoMediaRow {
            id: "m1".to_string(),
            checksum: "abc".to_string(),
            name: "movie.mp4".to_string(),
            file_path: "videoId-x/type-VIDEO".to_string(),
            encoded_path: encoded_path.map(str::to_string),
            media_status: status.to_string(),
        }
    }

    // --- row mapping ---

    #[test]
    fn media_row_maps_status_and_empty_encoded_path() {
        let media = AudioVideoMedia::try_from(media_row("PROCESSING", Some(""))).unwrap();

        assert_eq!(media.status, MediaStatus::Processing);
        assert_eq!(media.encoded_location, None);
        assert_eq!(media.raw_location, "videoId-x/type-VIDEO");

        let media = AudioVideoMedia::try_from(media_row("COMPLETED", Some("enc/out.mp4"))).unwrap();
        assert_eq!(media.encoded_location.as_deref(), Some("enc/out.mp4"));
    }

    #[test]
    fn unknown_media_status_is_an_error() {
        assert_matches!(
            AudioVideoMedia::try_from(media_row("TRANSCODING", None)),
            Err(AppError::External(_))
        );
    }

    #[test]
    fn video_row_rating_must_be_known() {
        let now = OffsetDateTime::now_utc();
        let mut row = VideoRow {
            id: Uuid::new_v4(),
            title: "Inception".to_string(),
            description: String::new(),
            launched_at: 2010,
            duration: 148.0,
            opened: false,
            published: true,
            rating: "AGE_14".to_string(),
            created_at: now,
            updated_at: now,
            video_id: None,
            trailer_id: Some("t1".to_string()),
            banner_id: None,
            thumbnail_id: Some("i1".to_string()),
            thumbnail_half_id: Some("i2".to_string()),
        };

        assert_eq!(row.metadata().unwrap().rating, Rating::Age14);
        assert_eq!(row.audio_video_ids(), vec!["t1".to_string()]);
        assert_eq!(row.image_ids(), vec!["i1".to_string(), "i2".to_string()]);

        row.rating = "NC-17".to_string();
        assert_matches!(row.metadata(), Err(AppError::External(_)));
    }

    #[test]
    fn search_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("dune"), "%dune%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }

    // --- against Postgres, when DATABASE_URL is set ---

    async fn repository() -> Option<(VideoRepository, DbPool)> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres gateway test");
            return None;
        };
        let pool = connect_to_db(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        Some((VideoRepository::new(pool.clone()), pool))
    }

    async fn count(pool: &DbPool, sql: &str, id: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql).bind(id).fetch_one(pool).await.unwrap()
    }

    async fn image_rows(pool: &DbPool, id: &str) -> i64 {
        count(pool, "SELECT COUNT(*) FROM videos_image_media WHERE id = $1", id).await
    }

    async fn audio_video_rows(pool: &DbPool, id: &str) -> i64 {
        count(pool, "SELECT COUNT(*) FROM videos_video_media WHERE id = $1", id).await
    }

    fn assert_same_state(loaded: &Video, saved: &Video) {
        assert_eq!(loaded.id(), saved.id());
        assert_eq!(loaded.metadata(), saved.metadata());
        assert_eq!(loaded.categories(), saved.categories());
        assert_eq!(loaded.genres(), saved.genres());
        assert_eq!(loaded.cast_members(), saved.cast_members());
        assert_eq!(loaded.video(), saved.video());
        assert_eq!(loaded.trailer(), saved.trailer());
        assert_eq!(loaded.banner(), saved.banner());
        assert_eq!(loaded.thumbnail(), saved.thumbnail());
        assert_eq!(loaded.thumbnail_half(), saved.thumbnail_half());
        // timestamptz keeps microseconds only
        assert!((loaded.created_at() - saved.created_at()).abs() < time::Duration::milliseconds(1));
    }

    #[tokio::test]
    async fn round_trip_preserves_every_slot_and_relation() {
        let Some((repo, _pool)) = repository().await else { return };
        let mut video = Video::new(metadata("Inception"), ids(2), ids(1), ids(3)).unwrap();
        video.attach_video(AudioVideoMedia::new("v-sum", "inception.mp4", "raw/video"));
        video.mark_completed(MediaKind::Video, "enc/inception.mp4").unwrap();
        video.attach_trailer(AudioVideoMedia::new("t-sum", "trailer.mp4", "raw/trailer"));
        video.attach_banner(ImageMedia::new("b-sum", "banner.png", "raw/banner"));
        video.attach_thumbnail(ImageMedia::new("th-sum", "thumb.png", "raw/thumb"));
        video.attach_thumbnail_half(ImageMedia::new("h-sum", "half.png", "raw/half"));

        let saved = repo.create(video).await.unwrap();
        let loaded = repo.find_by_id(saved.id()).await.unwrap().unwrap();

        assert_same_state(&loaded, &saved);
        assert_eq!(loaded.video().unwrap().status, MediaStatus::Completed);
        assert_eq!(loaded.trailer().unwrap().status, MediaStatus::Pending);
    }

    #[tokio::test]
    async fn media_shared_by_video_and_trailer_reloads_in_both_slots() {
        let Some((repo, _pool)) = repository().await else { return };
        let media = AudioVideoMedia::new("same-sum", "both.mp4", "raw/both");
        let mut video = Video::new(metadata("Memento"), HashSet::new(), HashSet::new(), HashSet::new()).unwrap();
        video.attach_video(media.clone());
        video.attach_trailer(media.clone());

        let saved = repo.save(video).await.unwrap();
        let loaded = repo.find_by_id(saved.id()).await.unwrap().unwrap();

        assert_eq!(loaded.video(), Some(&media));
        assert_eq!(loaded.trailer(), Some(&media));
    }

    #[tokio::test]
    async fn replacing_a_slot_removes_the_previous_media_row() {
        let Some((repo, pool)) = repository().await else { return };
        let first = ImageMedia::new("one", "first.png", "raw/banner");
        let second = ImageMedia::new("two", "second.png", "raw/banner");
        let mut video = Video::new(metadata("Interstellar"), ids(1), HashSet::new(), HashSet::new()).unwrap();
        video.attach_banner(first.clone());
        let mut video = repo.save(video).await.unwrap();
        assert_eq!(image_rows(&pool, &first.id).await, 1);

        video.attach_banner(second.clone());
        video.update(metadata("Interstellar"), HashSet::new(), ids(2), HashSet::new()).unwrap();
        let saved = repo.save(video).await.unwrap();

        let loaded = repo.find_by_id(saved.id()).await.unwrap().unwrap();
        assert_eq!(loaded.banner(), Some(&second));
        assert!(loaded.categories().is_empty());
        assert_eq!(loaded.genres().len(), 2);
        assert_eq!(image_rows(&pool, &first.id).await, 0);
        assert_eq!(image_rows(&pool, &second.id).await, 1);
    }

    #[tokio::test]
    async fn delete_removes_video_media_and_relations() {
        let Some((repo, pool)) = repository().await else { return };
        let media = AudioVideoMedia::new("sum", "tenet.mp4", "raw/tenet");
        let mut video = Video::new(metadata("Tenet"), ids(2), ids(2), ids(2)).unwrap();
        video.attach_video(media.clone());
        let id = repo.save(video).await.unwrap().id();

        repo.delete_by_id(id).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(audio_video_rows(&pool, &media.id).await, 0);
        let relations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos_categories WHERE video_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(relations, 0);
        // already gone
        repo.delete_by_id(id).await.unwrap();
    }

    #[tokio::test]
    async fn search_takes_wildcards_literally() {
        let Some((repo, _pool)) = repository().await else { return };
        let token = Uuid::new_v4().simple().to_string();
        for title in [format!("{token} 100% Wolf"), format!("{token} 1000 Wolves"), format!("{token} a_b")] {
            let video = Video::new(metadata(&title), HashSet::new(), HashSet::new(), HashSet::new()).unwrap();
            repo.create(video).await.unwrap();
        }

        let search = |terms: String| VideoSearchQuery { page: 0, per_page: 10, terms: Some(terms) };

        let page = repo.find_all(&search(format!("{token} 100%"))).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, format!("{token} 100% Wolf"));

        let page = repo.find_all(&search(format!("{} A_B", token.to_uppercase()))).await.unwrap();
        assert_eq!(page.total, 1);

        let page = repo.find_all(&search(token.clone())).await.unwrap();
        assert_eq!(page.total, 3);
    }
}
